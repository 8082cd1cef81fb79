//! 数据导入模块
//!
//! 从 JSON 请求文件或 CSV 弧列表构造求解请求

use crate::error::{Error, Result};
use crate::graph::{MaxFlowRequest, RawArc};
use indexmap::IndexSet;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub nodes_declared: usize,
    pub arcs_imported: usize,
    pub duration_ms: u64,
}

/// 从 JSON 文件读取请求（与 HTTP 请求体格式相同）
pub fn load_request_json<P: AsRef<Path>>(path: P) -> Result<MaxFlowRequest> {
    let file = File::open(path)?;
    let request = serde_json::from_reader(BufReader::new(file))?;
    Ok(request)
}

/// CSV 弧记录
#[derive(Debug, Deserialize)]
struct ArcRecord {
    source: String,
    target: String,
    capacity: String,
}

/// CSV 弧列表导入器
///
/// 表头为 `source,target,capacity`。节点按首次出现的顺序声明，
/// 可以用 [`ArcListImporter::with_nodes`] 预先声明节点以固定顺序。
/// 源点和汇点不会被自动声明：既不在弧列表中也没有预先声明的端点
/// 由图模型校验报告为未声明节点。
pub struct ArcListImporter {
    source: String,
    sink: String,
    nodes: Vec<String>,
}

impl ArcListImporter {
    /// 创建导入器
    pub fn new(source: impl Into<String>, sink: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            sink: sink.into(),
            nodes: Vec::new(),
        }
    }

    /// 预先声明节点（包括没有任何弧的孤立节点）
    pub fn with_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// 从 CSV 文件导入
    pub fn import_csv<P: AsRef<Path>>(&self, path: P) -> Result<(MaxFlowRequest, ImportStats)> {
        let file = File::open(path)?;
        self.import_reader(BufReader::new(file))
    }

    /// 从任意读取器导入 CSV
    pub fn import_reader<R: Read>(&self, reader: R) -> Result<(MaxFlowRequest, ImportStats)> {
        let start = std::time::Instant::now();
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut nodes: IndexSet<String> = IndexSet::new();
        for name in &self.nodes {
            if !nodes.insert(name.clone()) {
                return Err(Error::Import(format!("节点重复声明: {}", name)));
            }
        }

        let mut edges = Vec::new();
        for (i, record) in csv_reader.deserialize::<ArcRecord>().enumerate() {
            let record =
                record.map_err(|e| Error::Import(format!("第 {} 条弧解析失败: {}", i + 1, e)))?;
            nodes.insert(record.source.clone());
            nodes.insert(record.target.clone());
            edges.push(RawArc {
                source: record.source,
                target: record.target,
                capacity: capacity_value(&record.capacity),
            });
        }

        let stats = ImportStats {
            nodes_declared: nodes.len(),
            arcs_imported: edges.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        let request = MaxFlowRequest {
            nodes: nodes.into_iter().collect(),
            edges,
            source: Some(self.source.clone()),
            sink: Some(self.sink.clone()),
        };
        Ok((request, stats))
    }
}

/// CSV 中的容量按数字解析，解析不了的原样保留，由图模型校验报告
fn capacity_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<u64>() {
        return Value::from(n);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::from(f),
        _ => Value::String(raw.to_string()),
    }
}
