//! FlowTrace 服务器入口
//!
//! 启动 HTTP API 服务器

use flowtrace::config::{ServerConfig, SolverConfig, DEFAULT_SERVER_MAX_ITERATIONS};
use flowtrace::server::start_server;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowtrace-server")]
#[command(about = "FlowTrace 最大流 HTTP API 服务器")]
struct Args {
    /// 监听地址
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// 监听端口
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// 允许跨域访问的前端地址
    #[arg(long, default_value = "http://localhost:3000")]
    cors_origin: String,

    /// 单次求解的最大增广次数（0 表示不限制）
    #[arg(short, long, default_value_t = DEFAULT_SERVER_MAX_ITERATIONS)]
    max_iterations: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flowtrace=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let solver = match args.max_iterations {
        0 => SolverConfig::new(),
        limit => SolverConfig::new().with_max_iterations(limit),
    };

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        cors_origin: args.cors_origin,
        solver,
    };

    start_server(config).await?;

    Ok(())
}
