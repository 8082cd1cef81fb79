//! FlowTrace - 最大流计算与迭代轨迹
//!
//! 对用户提交的有向带容量小图计算最大流，并记录每一次增广后的状态：
//! - Edmonds-Karp（BFS 增广），同样的输入总得到同样的轨迹
//! - 每次增广一个不可变快照，可按下标前后翻页
//! - 终止时给出最小割
//! - HTTP API、CSV/JSON 导入和命令行输出

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod metrics;
pub mod server;

// 重导出常用类型
pub use algorithm::{solve, solve_batch, EdmondsKarp, FlowTrace, MinCut, Snapshot};
pub use config::{ServerConfig, SolverConfig};
pub use error::{Error, Result, ValidationError};
pub use graph::{GraphModel, MaxFlowRequest, RawArc};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
