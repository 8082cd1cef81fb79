//! 最大流算法
//!
//! Edmonds-Karp（基于 BFS 的 Ford-Fulkerson），每次增广后记录一个快照。
//!
//! 求解过程是一个状态机：
//! `Validating → Iterating → Done`，或校验失败时 `Validating → Rejected`。
//! 结果要么完整返回，要么整体失败，不存在部分结果。

use super::augmenter::push_flow;
use super::cancel::CancellationFlag;
use super::min_cut::{min_cut, MinCut};
use super::path_finder::AugmentingPathFinder;
use super::recorder::{IterationRecorder, Snapshot};
use super::residual::ResidualNetwork;
use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::graph::{GraphModel, MaxFlowRequest};
use crate::metrics::{self, SolveOutcome};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

/// 最大流结果及迭代轨迹
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowTrace {
    /// 最大流量值
    pub max_flow: u64,
    /// 每次增广后的快照，下标 0 为第一次增广之后的状态
    pub snapshots: Vec<Snapshot>,
    /// 终止状态下的最小割
    pub min_cut: MinCut,
}

impl FlowTrace {
    /// 增广次数
    pub fn iterations(&self) -> usize {
        self.snapshots.len()
    }

    /// 按下标取快照，越界返回 None
    pub fn snapshot(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }
}

/// 求解阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvePhase {
    Validating,
    Iterating,
    Done,
    Rejected,
}

/// Edmonds-Karp 最大流求解器
///
/// 不持有跨请求状态，同一实例可以在多个线程中并发使用。
#[derive(Debug, Clone, Default)]
pub struct EdmondsKarp {
    config: SolverConfig,
    cancel: Option<CancellationFlag>,
}

impl EdmondsKarp {
    /// 创建算法实例
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// 绑定取消标志，每轮迭代检查一次
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// 校验请求并计算最大流
    pub fn solve(&self, request: &MaxFlowRequest) -> Result<FlowTrace> {
        let request_id = Uuid::new_v4();
        let span = info_span!("solve", %request_id);
        let _enter = span.enter();

        let metrics = metrics::global_metrics();
        let timer = metrics.record_solve_start();

        let result = self.run(request);

        let outcome = match &result {
            Ok(_) => SolveOutcome::Succeeded,
            Err(Error::Validation(_)) => SolveOutcome::Rejected,
            Err(Error::ResourceExhausted { .. }) => SolveOutcome::Exhausted,
            Err(Error::Cancelled) => SolveOutcome::Cancelled,
            Err(_) => SolveOutcome::Failed,
        };
        let iterations = result.as_ref().map(FlowTrace::iterations).unwrap_or(0);
        metrics.record_solve_complete(timer, outcome, iterations);

        match &result {
            Ok(trace) => info!(
                max_flow = trace.max_flow,
                iterations = trace.iterations(),
                "最大流计算完成"
            ),
            Err(Error::InvariantViolation(msg)) => error!(%msg, "内部不变量被破坏"),
            Err(e) => warn!(error = %e, "最大流计算失败"),
        }

        result
    }

    /// 并行求解多个互相独立的请求，结果顺序与输入一致
    ///
    /// 所有请求共享同一个取消标志，取消后尚未完成的请求都返回 [`Error::Cancelled`]。
    pub fn solve_all(&self, requests: &[MaxFlowRequest]) -> Vec<Result<FlowTrace>> {
        requests.par_iter().map(|req| self.solve(req)).collect()
    }

    fn run(&self, request: &MaxFlowRequest) -> Result<FlowTrace> {
        let mut phase = SolvePhase::Validating;
        debug!(?phase, nodes = request.nodes.len(), arcs = request.edges.len());

        let graph = match GraphModel::build(request) {
            Ok(graph) => graph,
            Err(e) => {
                phase = SolvePhase::Rejected;
                debug!(?phase, error = %e);
                return Err(e.into());
            }
        };

        self.solve_graph(&graph)
    }

    /// 对已校验的图计算最大流
    pub fn solve_graph(&self, graph: &GraphModel) -> Result<FlowTrace> {
        let mut network = ResidualNetwork::from_graph(graph);
        let mut finder = AugmentingPathFinder::new(network.node_count());
        let mut recorder = IterationRecorder::new(graph);
        let mut total: u64 = 0;

        let mut phase = SolvePhase::Iterating;
        debug!(?phase);

        while phase == SolvePhase::Iterating {
            if self.cancel.as_ref().is_some_and(CancellationFlag::is_cancelled) {
                return Err(Error::Cancelled);
            }

            let Some(path) = finder.find(&network, graph.source(), graph.sink()) else {
                phase = SolvePhase::Done;
                continue;
            };

            if let Some(limit) = self.config.max_iterations {
                if recorder.len() >= limit {
                    return Err(Error::ResourceExhausted { limit });
                }
            }

            let pushed = push_flow(&mut network, &path)?;
            total = total.checked_add(pushed).ok_or_else(|| {
                Error::InvariantViolation(format!("累计流量溢出: {} + {}", total, pushed))
            })?;

            debug!(
                iteration = recorder.len(),
                bottleneck = pushed,
                path_len = path.len(),
                total,
                "增广"
            );
            recorder.record(&network, &path, pushed, total);
        }

        debug!(?phase, iterations = recorder.len());

        let min_cut = min_cut(graph, &network);
        if min_cut.capacity != total {
            return Err(Error::InvariantViolation(format!(
                "最小割容量 {} 与最大流 {} 不一致",
                min_cut.capacity, total
            )));
        }

        Ok(FlowTrace {
            max_flow: total,
            snapshots: recorder.into_snapshots(),
            min_cut,
        })
    }
}

/// 使用默认配置求解
pub fn solve(request: &MaxFlowRequest) -> Result<FlowTrace> {
    EdmondsKarp::default().solve(request)
}

/// 并行求解多个互相独立的请求，结果顺序与输入一致
pub fn solve_batch(requests: &[MaxFlowRequest], config: &SolverConfig) -> Vec<Result<FlowTrace>> {
    EdmondsKarp::new(config.clone()).solve_all(requests)
}
