//! 迭代快照记录
//!
//! 每次增广后把全部弧的 (流量, 容量) 按值复制成一个快照，
//! 快照与残量网络之间没有共享，之后的增广不会影响已记录的快照。

use super::path_finder::AugmentingPath;
use super::residual::{Direction, ResidualNetwork};
use crate::graph::GraphModel;
use serde::{Deserialize, Serialize};

/// 快照中单条弧的状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcState {
    /// 弧在请求中的下标
    pub id: usize,
    pub source: String,
    pub target: String,
    pub capacity: u64,
    pub flow: u64,
}

impl ArcState {
    /// 剩余容量
    pub fn residual(&self) -> u64 {
        self.capacity - self.flow
    }

    /// 是否已满
    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }

    /// 绘图用的 "流量/容量" 标签
    pub fn label(&self) -> String {
        format!("{}/{}", self.flow, self.capacity)
    }
}

/// 增广路径上的一步
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    /// 经过的弧
    pub arc: usize,
    pub from: String,
    pub to: String,
    pub direction: Direction,
}

/// 一次增广之后的完整状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// 迭代序号，从 0 开始
    pub iteration: usize,
    /// 本轮推送的流量
    pub bottleneck: u64,
    /// 截至本轮的累计流量
    pub cumulative_flow: u64,
    /// 本轮使用的增广路径
    pub path: Vec<PathStep>,
    /// 全部弧的状态，按请求顺序
    pub arcs: Vec<ArcState>,
}

impl Snapshot {
    /// 节点的总流入
    pub fn inflow(&self, node: &str) -> u64 {
        self.arcs
            .iter()
            .filter(|a| a.target == node)
            .map(|a| a.flow)
            .sum()
    }

    /// 节点的总流出
    pub fn outflow(&self, node: &str) -> u64 {
        self.arcs
            .iter()
            .filter(|a| a.source == node)
            .map(|a| a.flow)
            .sum()
    }

    /// 路径是否经过某条弧
    pub fn path_uses(&self, arc: usize) -> bool {
        self.path.iter().any(|step| step.arc == arc)
    }
}

/// 迭代记录器
pub struct IterationRecorder {
    names: Vec<String>,
    snapshots: Vec<Snapshot>,
}

impl IterationRecorder {
    pub fn new(graph: &GraphModel) -> Self {
        Self {
            names: graph.node_names().map(str::to_string).collect(),
            snapshots: Vec::new(),
        }
    }

    /// 记录一次增广后的状态
    pub fn record(
        &mut self,
        network: &ResidualNetwork,
        path: &AugmentingPath,
        bottleneck: u64,
        cumulative_flow: u64,
    ) {
        let arcs = network
            .arcs()
            .iter()
            .enumerate()
            .map(|(id, arc)| ArcState {
                id,
                source: self.name(arc.src().index()),
                target: self.name(arc.dst().index()),
                capacity: arc.capacity(),
                flow: arc.flow(),
            })
            .collect();

        let path = path
            .edges()
            .iter()
            .map(|&e| PathStep {
                arc: e.arc().index(),
                from: self.name(network.tail(e).index()),
                to: self.name(network.head(e).index()),
                direction: e.direction(),
            })
            .collect();

        self.snapshots.push(Snapshot {
            iteration: self.snapshots.len(),
            bottleneck,
            cumulative_flow,
            path,
            arcs,
        });
    }

    /// 已记录的迭代次数
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }

    fn name(&self, index: usize) -> String {
        self.names.get(index).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::augmenter::push_flow;
    use crate::algorithm::path_finder::AugmentingPathFinder;
    use crate::graph::MaxFlowRequest;

    #[test]
    fn test_snapshots_are_value_copies() {
        let req = MaxFlowRequest::new(["S", "T"], "S", "T")
            .with_arc("S", "T", 2)
            .with_arc("S", "T", 3);
        let graph = GraphModel::build(&req).unwrap();
        let mut net = ResidualNetwork::from_graph(&graph);
        let mut finder = AugmentingPathFinder::new(net.node_count());
        let mut recorder = IterationRecorder::new(&graph);

        let mut total = 0;
        while let Some(path) = finder.find(&net, graph.source(), graph.sink()) {
            let pushed = push_flow(&mut net, &path).unwrap();
            total += pushed;
            recorder.record(&net, &path, pushed, total);
        }

        let snapshots = recorder.into_snapshots();
        assert_eq!(snapshots.len(), 2);

        // 第一个快照不受第二次增广影响
        assert_eq!(snapshots[0].iteration, 0);
        assert_eq!(snapshots[0].bottleneck, 2);
        assert_eq!(snapshots[0].arcs[0].flow, 2);
        assert_eq!(snapshots[0].arcs[1].flow, 0);
        assert!(snapshots[0].path_uses(0));

        assert_eq!(snapshots[1].iteration, 1);
        assert_eq!(snapshots[1].cumulative_flow, 5);
        assert_eq!(snapshots[1].arcs[1].flow, 3);
        assert_eq!(snapshots[1].path[0].from, "S");
        assert_eq!(snapshots[1].path[0].to, "T");
        assert_eq!(snapshots[1].path[0].direction, Direction::Forward);
    }

    #[test]
    fn test_arc_state_helpers() {
        let arc = ArcState {
            id: 0,
            source: "A".into(),
            target: "B".into(),
            capacity: 5,
            flow: 3,
        };
        assert_eq!(arc.residual(), 2);
        assert!(!arc.is_saturated());
        assert_eq!(arc.label(), "3/5");
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = Snapshot {
            iteration: 0,
            bottleneck: 1,
            cumulative_flow: 1,
            path: vec![PathStep {
                arc: 0,
                from: "S".into(),
                to: "T".into(),
                direction: Direction::Backward,
            }],
            arcs: Vec::new(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["cumulativeFlow"], 1);
        assert_eq!(json["path"][0]["direction"], "backward");
    }
}
