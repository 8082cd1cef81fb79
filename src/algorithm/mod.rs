//! 图算法模块
//!
//! Edmonds-Karp 最大流：残量网络、BFS 增广路径、流量增广、迭代快照和最小割

mod augmenter;
mod cancel;
mod max_flow;
mod min_cut;
mod path_finder;
mod recorder;
mod residual;

pub use augmenter::{bottleneck, push_flow};
pub use cancel::{CancelOnDrop, CancellationFlag};
pub use max_flow::{solve, solve_batch, EdmondsKarp, FlowTrace, SolvePhase};
pub use min_cut::{min_cut, MinCut};
pub use path_finder::{AugmentingPath, AugmentingPathFinder};
pub use recorder::{ArcState, IterationRecorder, PathStep, Snapshot};
pub use residual::{Direction, ResidualArc, ResidualEdgeId, ResidualNetwork};
