//! 增广路径查找
//!
//! 在残量网络上做 BFS（Edmonds-Karp），只走残量为正的边（含反向边）。
//! 邻接表按节点声明顺序排列，因此同样的输入总是选中同一条最短路径。

use super::residual::{ResidualEdgeId, ResidualNetwork};
use crate::graph::NodeId;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// 增广路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    /// 从源点到汇点依次经过的残量边
    edges: SmallVec<[ResidualEdgeId; 8]>,
    /// 从源点到汇点依次经过的节点
    nodes: SmallVec<[NodeId; 8]>,
}

impl AugmentingPath {
    pub fn edges(&self) -> &[ResidualEdgeId] {
        &self.edges
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// 路径长度（边数）
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// BFS 增广路径查找器
///
/// 复用访问标记和队列缓冲区，每轮迭代不再重新分配。
pub struct AugmentingPathFinder {
    parent: Vec<Option<ResidualEdgeId>>,
    visited: Vec<bool>,
    queue: VecDeque<NodeId>,
}

impl AugmentingPathFinder {
    /// 创建查找器
    pub fn new(node_count: usize) -> Self {
        Self {
            parent: vec![None; node_count],
            visited: vec![false; node_count],
            queue: VecDeque::with_capacity(node_count),
        }
    }

    /// 查找一条从 source 到 sink 的最短增广路径，不存在时返回 None
    pub fn find(
        &mut self,
        network: &ResidualNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Option<AugmentingPath> {
        let n = network.node_count();
        if source.index() >= n || sink.index() >= n || source == sink {
            return None;
        }

        self.parent.clear();
        self.parent.resize(n, None);
        self.visited.clear();
        self.visited.resize(n, false);
        self.queue.clear();

        self.visited[source.index()] = true;
        self.queue.push_back(source);

        'search: while let Some(u) = self.queue.pop_front() {
            for &edge in network.edges_from(u) {
                let v = network.head(edge);
                if self.visited[v.index()] || network.edge_residual(edge) == 0 {
                    continue;
                }
                self.visited[v.index()] = true;
                self.parent[v.index()] = Some(edge);
                if v == sink {
                    break 'search;
                }
                self.queue.push_back(v);
            }
        }

        if !self.visited[sink.index()] {
            return None;
        }

        // 从汇点回溯重建路径
        let mut edges = SmallVec::new();
        let mut nodes = SmallVec::new();
        let mut current = sink;
        nodes.push(current);
        while current != source {
            let edge = self.parent[current.index()]?;
            edges.push(edge);
            current = network.tail(edge);
            nodes.push(current);
        }
        edges.reverse();
        nodes.reverse();

        Some(AugmentingPath { edges, nodes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ArcId, GraphModel, MaxFlowRequest};
    use crate::algorithm::residual::Direction;

    fn setup(req: &MaxFlowRequest) -> (GraphModel, ResidualNetwork, AugmentingPathFinder) {
        let graph = GraphModel::build(req).unwrap();
        let network = ResidualNetwork::from_graph(&graph);
        let finder = AugmentingPathFinder::new(network.node_count());
        (graph, network, finder)
    }

    #[test]
    fn test_simple_path() {
        let req = MaxFlowRequest::new(["S", "A", "T"], "S", "T")
            .with_arc("S", "A", 3)
            .with_arc("A", "T", 2);
        let (graph, net, mut finder) = setup(&req);

        let path = finder.find(&net, graph.source(), graph.sink()).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(
            path.nodes(),
            &[NodeId::new(0), NodeId::new(1), NodeId::new(2)]
        );
        assert_eq!(path.edges()[0].arc(), ArcId::new(0));
        assert_eq!(path.edges()[1].arc(), ArcId::new(1));
    }

    #[test]
    fn test_no_path() {
        let req = MaxFlowRequest::new(["A", "B"], "A", "B");
        let (graph, net, mut finder) = setup(&req);
        assert!(finder.find(&net, graph.source(), graph.sink()).is_none());

        // 零容量弧不可走
        let req = MaxFlowRequest::new(["A", "B"], "A", "B").with_arc("A", "B", 0);
        let (graph, net, mut finder) = setup(&req);
        assert!(finder.find(&net, graph.source(), graph.sink()).is_none());
    }

    #[test]
    fn test_shortest_path_preferred() {
        // S->A->B->T 与 S->T 两条路径，BFS 选最短的
        let req = MaxFlowRequest::new(["S", "A", "B", "T"], "S", "T")
            .with_arc("S", "A", 5)
            .with_arc("A", "B", 5)
            .with_arc("B", "T", 5)
            .with_arc("S", "T", 1);
        let (graph, net, mut finder) = setup(&req);

        let path = finder.find(&net, graph.source(), graph.sink()).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.edges()[0].arc(), ArcId::new(3));
    }

    #[test]
    fn test_tie_break_by_declaration_order() {
        // 两条等长路径，节点 B 先于 A 声明，因此走 B
        let req = MaxFlowRequest::new(["S", "B", "A", "T"], "S", "T")
            .with_arc("S", "A", 1)
            .with_arc("A", "T", 1)
            .with_arc("S", "B", 1)
            .with_arc("B", "T", 1);
        let (graph, net, mut finder) = setup(&req);

        let path = finder.find(&net, graph.source(), graph.sink()).unwrap();
        assert_eq!(path.nodes()[1], graph.node_id("B").unwrap());
    }

    #[test]
    fn test_uses_backward_edge() {
        // 经典需要撤销流量的图
        let req = MaxFlowRequest::new(["S", "A", "B", "T"], "S", "T")
            .with_arc("S", "A", 1)
            .with_arc("S", "B", 1)
            .with_arc("A", "B", 1)
            .with_arc("A", "T", 1)
            .with_arc("B", "T", 1);
        let (graph, mut net, mut finder) = setup(&req);

        // 人为推送 S->A->B->T，封死两条直连路径的一部分
        net.augment(
            &[
                ResidualEdgeId::forward(ArcId::new(0)),
                ResidualEdgeId::forward(ArcId::new(2)),
                ResidualEdgeId::forward(ArcId::new(4)),
            ],
            1,
        )
        .unwrap();

        let path = finder.find(&net, graph.source(), graph.sink()).unwrap();
        // S->B, B->A（撤销 A->B）, A->T
        assert_eq!(path.len(), 3);
        assert_eq!(path.edges()[1].arc(), ArcId::new(2));
        assert_eq!(path.edges()[1].direction(), Direction::Backward);

        net.augment(path.edges(), 1).unwrap();
        assert!(finder.find(&net, graph.source(), graph.sink()).is_none());
    }
}
