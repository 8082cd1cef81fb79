//! 最小割
//!
//! 求解结束后从源点出发沿正残量边 BFS，能到达的节点构成源侧

use super::residual::ResidualNetwork;
use crate::graph::{GraphModel, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 最小割结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinCut {
    /// 源侧节点，按声明顺序
    pub source_side: Vec<String>,
    /// 从源侧指向汇侧的弧（均已满载），即瓶颈弧
    pub arcs: Vec<usize>,
    /// 割容量，等于最大流
    pub capacity: u64,
}

/// 计算终止状态下的最小割
pub fn min_cut(graph: &GraphModel, network: &ResidualNetwork) -> MinCut {
    let reachable = source_side(network, graph.source());

    let source_side = graph
        .node_names()
        .enumerate()
        .filter(|(i, _)| reachable[*i])
        .map(|(_, name)| name.to_string())
        .collect();

    let mut arcs = Vec::new();
    let mut capacity = 0u64;
    for (id, arc) in network.arcs().iter().enumerate() {
        if reachable[arc.src().index()] && !reachable[arc.dst().index()] {
            arcs.push(id);
            capacity = capacity.saturating_add(arc.capacity());
        }
    }

    MinCut {
        source_side,
        arcs,
        capacity,
    }
}

fn source_side(network: &ResidualNetwork, source: NodeId) -> Vec<bool> {
    let mut visited = vec![false; network.node_count()];
    let mut queue = VecDeque::new();

    if source.index() >= visited.len() {
        return visited;
    }
    visited[source.index()] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for &edge in network.edges_from(u) {
            let v = network.head(edge);
            if !visited[v.index()] && network.edge_residual(edge) > 0 {
                visited[v.index()] = true;
                queue.push_back(v);
            }
        }
    }

    visited
}
