//! 求解请求
//!
//! 传输层提交的松散类型数据。容量保留为原始 JSON 值，
//! 由 [`GraphModel::build`](crate::graph::GraphModel::build) 统一校验。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 原始弧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArc {
    pub source: String,
    pub target: String,
    pub capacity: Value,
}

impl RawArc {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        capacity: impl Into<Value>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            capacity: capacity.into(),
        }
    }
}

/// 最大流请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowRequest {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<RawArc>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub sink: Option<String>,
}

impl MaxFlowRequest {
    /// 用节点列表和源汇点创建请求
    pub fn new<I, S>(nodes: I, source: impl Into<String>, sink: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
            edges: Vec::new(),
            source: Some(source.into()),
            sink: Some(sink.into()),
        }
    }

    /// 追加一条弧
    pub fn with_arc(
        mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        capacity: impl Into<Value>,
    ) -> Self {
        self.edges.push(RawArc::new(source, target, capacity));
        self
    }
}
