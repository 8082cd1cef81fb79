//! 弧定义
//!
//! 有向带容量弧；同一有序节点对之间允许存在多条平行弧，各自独立计数

use crate::graph::node::NodeId;
use serde::{Deserialize, Serialize};

/// 弧 ID（即弧在请求中的提交顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArcId(pub usize);

impl ArcId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ArcId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// 经过校验的有向弧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowArc {
    id: ArcId,
    src: NodeId,
    dst: NodeId,
    capacity: u64,
}

impl FlowArc {
    pub fn new(id: ArcId, src: NodeId, dst: NodeId, capacity: u64) -> Self {
        Self {
            id,
            src,
            dst,
            capacity,
        }
    }

    pub fn id(&self) -> ArcId {
        self.id
    }

    /// 起点
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// 终点
    pub fn dst(&self) -> NodeId {
        self.dst
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// 自环弧永远不会出现在增广路径上
    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_arc() {
        let arc = FlowArc::new(ArcId::new(0), NodeId::new(0), NodeId::new(1), 7);
        assert_eq!(arc.id().index(), 0);
        assert_eq!(arc.src(), NodeId::new(0));
        assert_eq!(arc.dst(), NodeId::new(1));
        assert_eq!(arc.capacity(), 7);
        assert!(!arc.is_self_loop());
        assert!(FlowArc::new(ArcId::new(1), NodeId::new(2), NodeId::new(2), 1).is_self_loop());
    }
}
