//! 残量网络
//!
//! 每条弧拆成一对残量边：弧 i 的正向边编号 2i（残量 = 容量 - 流量），
//! 反向边编号 2i+1（残量 = 流量，表示可以撤销的流量）。
//! 流量只能通过 [`ResidualNetwork::augment`] 修改，始终满足 0 ≤ flow ≤ capacity。

use crate::error::{Error, Result};
use crate::graph::{ArcId, GraphModel, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 残量边的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 沿弧方向推送流量
    Forward,
    /// 沿反向边撤销已有流量
    Backward,
}

/// 残量边 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResidualEdgeId(usize);

impl ResidualEdgeId {
    pub fn forward(arc: ArcId) -> Self {
        Self(arc.index() * 2)
    }

    pub fn backward(arc: ArcId) -> Self {
        Self(arc.index() * 2 + 1)
    }

    /// 所属的弧
    pub fn arc(&self) -> ArcId {
        ArcId::new(self.0 / 2)
    }

    pub fn direction(&self) -> Direction {
        if self.0 % 2 == 0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// 配对的另一条残量边
    pub fn reverse(&self) -> Self {
        Self(self.0 ^ 1)
    }
}

/// 单条弧的流量状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidualArc {
    src: NodeId,
    dst: NodeId,
    capacity: u64,
    flow: u64,
}

impl ResidualArc {
    pub fn src(&self) -> NodeId {
        self.src
    }

    pub fn dst(&self) -> NodeId {
        self.dst
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn flow(&self) -> u64 {
        self.flow
    }

    /// 正向残量
    pub fn forward_residual(&self) -> u64 {
        self.capacity - self.flow
    }

    /// 反向残量（可撤销的流量）
    pub fn backward_residual(&self) -> u64 {
        self.flow
    }
}

/// 残量网络
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    arcs: Vec<ResidualArc>,
    /// 每个节点出发的残量边，按对端节点的声明顺序排列，同一对端按弧顺序排列
    adjacency: Vec<Vec<ResidualEdgeId>>,
}

impl ResidualNetwork {
    /// 从图模型构造，所有弧流量置零
    pub fn from_graph(graph: &GraphModel) -> Self {
        let arcs: Vec<ResidualArc> = graph
            .arcs()
            .iter()
            .map(|a| ResidualArc {
                src: a.src(),
                dst: a.dst(),
                capacity: a.capacity(),
                flow: 0,
            })
            .collect();

        let mut adjacency: Vec<Vec<ResidualEdgeId>> = vec![Vec::new(); graph.node_count()];
        for arc in graph.arcs() {
            adjacency[arc.src().index()].push(ResidualEdgeId::forward(arc.id()));
            adjacency[arc.dst().index()].push(ResidualEdgeId::backward(arc.id()));
        }

        let mut network = Self { arcs, adjacency };
        for u in 0..network.adjacency.len() {
            let mut edges = std::mem::take(&mut network.adjacency[u]);
            edges.sort_by_key(|&e| (network.head(e), e));
            network.adjacency[u] = edges;
        }
        network
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn arcs(&self) -> &[ResidualArc] {
        &self.arcs
    }

    pub fn arc(&self, id: ArcId) -> Option<&ResidualArc> {
        self.arcs.get(id.index())
    }

    /// 从节点出发的所有残量边（包括残量为零的边）
    pub fn edges_from(&self, node: NodeId) -> &[ResidualEdgeId] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 残量边的起点
    pub fn tail(&self, edge: ResidualEdgeId) -> NodeId {
        let arc = &self.arcs[edge.arc().index()];
        match edge.direction() {
            Direction::Forward => arc.src,
            Direction::Backward => arc.dst,
        }
    }

    /// 残量边的终点
    pub fn head(&self, edge: ResidualEdgeId) -> NodeId {
        let arc = &self.arcs[edge.arc().index()];
        match edge.direction() {
            Direction::Forward => arc.dst,
            Direction::Backward => arc.src,
        }
    }

    /// 单条残量边的残量
    pub fn edge_residual(&self, edge: ResidualEdgeId) -> u64 {
        let arc = &self.arcs[edge.arc().index()];
        match edge.direction() {
            Direction::Forward => arc.forward_residual(),
            Direction::Backward => arc.backward_residual(),
        }
    }

    /// 有序节点对 (u, v) 的总残量，平行弧与反向边一并计入
    pub fn residual_capacity(&self, u: NodeId, v: NodeId) -> u64 {
        self.edges_from(u)
            .iter()
            .filter(|&&e| self.head(e) == v)
            .map(|&e| self.edge_residual(e))
            .fold(0u64, u64::saturating_add)
    }

    /// 节点的净流入量（流入 - 流出）
    pub fn excess(&self, node: NodeId) -> i128 {
        let inflow: i128 = self
            .arcs
            .iter()
            .filter(|arc| arc.dst == node)
            .map(|arc| arc.flow as i128)
            .sum();
        let outflow: i128 = self
            .arcs
            .iter()
            .filter(|arc| arc.src == node)
            .map(|arc| arc.flow as i128)
            .sum();
        inflow - outflow
    }

    /// 沿路径推送 amount 单位流量
    ///
    /// 先完整检查再修改：路径必须首尾相接、不重复使用同一条弧、
    /// 每条边残量不小于 amount，否则返回 `InvariantViolation` 且网络保持不变。
    pub fn augment(&mut self, path: &[ResidualEdgeId], amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(Error::InvariantViolation("增广量必须为正".into()));
        }
        if path.is_empty() {
            return Err(Error::InvariantViolation("增广路径为空".into()));
        }

        let mut seen = HashSet::with_capacity(path.len());
        for (i, &edge) in path.iter().enumerate() {
            if edge.arc().index() >= self.arcs.len() {
                return Err(Error::InvariantViolation(format!(
                    "残量边 {:?} 不存在",
                    edge
                )));
            }
            if !seen.insert(edge.arc()) {
                return Err(Error::InvariantViolation(format!(
                    "弧 {} 在路径中重复出现",
                    edge.arc().index()
                )));
            }
            if i > 0 && self.head(path[i - 1]) != self.tail(edge) {
                return Err(Error::InvariantViolation(format!(
                    "路径在第 {} 条边处断开",
                    i
                )));
            }
            let residual = self.edge_residual(edge);
            if residual < amount {
                return Err(Error::InvariantViolation(format!(
                    "增广量 {} 超过弧 {} 的残量 {}",
                    amount,
                    edge.arc().index(),
                    residual
                )));
            }
        }

        for &edge in path {
            let arc = &mut self.arcs[edge.arc().index()];
            match edge.direction() {
                Direction::Forward => arc.flow += amount,
                Direction::Backward => arc.flow -= amount,
            }
        }

        Ok(())
    }
}
