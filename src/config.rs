//! 配置

use serde::{Deserialize, Serialize};

/// 服务端默认迭代上限
pub const DEFAULT_SERVER_MAX_ITERATIONS: usize = 100_000;

/// 求解器配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// 最大增广次数；None 表示不限制（Edmonds-Karp 本身保证终止）
    pub max_iterations: Option<usize>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置迭代上限
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 允许跨域访问的前端地址
    pub cors_origin: String,
    pub solver: SolverConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origin: "http://localhost:3000".to_string(),
            solver: SolverConfig::new().with_max_iterations(DEFAULT_SERVER_MAX_ITERATIONS),
        }
    }
}
