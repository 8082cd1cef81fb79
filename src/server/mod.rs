//! HTTP 服务器模块
//!
//! 提供最大流计算的 REST API

use crate::algorithm::{CancellationFlag, EdmondsKarp, FlowTrace};
use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::graph::MaxFlowRequest;
use crate::metrics;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub solver: EdmondsKarp,
}

/// 构造路由
pub fn router(config: &ServerConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| Error::Server(format!("无效的 CORS 来源 {}: {}", config.cors_origin, e)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let state = AppState {
        solver: EdmondsKarp::new(config.solver.clone()),
    };

    Ok(Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 指标和统计
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        // 最大流
        .route("/calculate-max-flow", post(calculate_max_flow))
        .route("/calculate-max-flow/batch", post(calculate_max_flow_batch))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// 启动服务器
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let app = router(&config)?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Server(format!("绑定地址失败: {}", e)))?;

    info!(%addr, max_iterations = ?config.solver.max_iterations, "FlowTrace 服务器启动");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("服务器错误: {}", e)))?;

    Ok(())
}

// ==================== 处理器 ====================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus 格式指标
async fn metrics_handler() -> Response {
    let prom = metrics::global_metrics().to_prometheus();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        prom.content,
    )
        .into_response()
}

/// 详细统计信息
async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = metrics::global_metrics().snapshot();

    Json(serde_json::json!({
        "solves": {
            "total": snapshot.total_solves,
            "succeeded": snapshot.succeeded_solves,
            "rejected": snapshot.rejected_solves,
            "exhausted": snapshot.exhausted_solves,
            "cancelled": snapshot.cancelled_solves,
            "failed": snapshot.failed_solves,
            "avg_duration_ms": snapshot.avg_solve_duration_ms,
            "slow": snapshot.slow_solves,
        },
        "iterations": {
            "total": snapshot.total_iterations,
            "avg": snapshot.avg_iterations,
            "limit": state.solver.config().max_iterations,
        },
        "system": {
            "uptime_seconds": snapshot.uptime_seconds,
            "version": env!("CARGO_PKG_VERSION"),
        }
    }))
}

/// 计算最大流
///
/// 求解在阻塞线程池中执行；客户端断开导致处理器被 drop 时，
/// 守卫会置位取消标志，求解循环在下一轮检查时退出。
async fn calculate_max_flow(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MaxFlowRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };

    let flag = CancellationFlag::new();
    let guard = flag.drop_guard();
    let solver = state.solver.clone().with_cancellation(flag);

    let joined = tokio::task::spawn_blocking(move || solver.solve(&req)).await;
    guard.disarm();

    match joined {
        Ok(Ok(trace)) => (StatusCode::OK, Json(trace)).into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            error!(error = %e, "求解任务异常终止");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("内部错误")),
            )
                .into_response()
        }
    }
}

/// 批量计算最大流，逐个返回结果
///
/// 整个批次共享一个取消标志，客户端断开后未完成的请求全部取消。
async fn calculate_max_flow_batch(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Vec<MaxFlowRequest>>, JsonRejection>,
) -> Response {
    let requests = match payload {
        Ok(Json(requests)) => requests,
        Err(rejection) => return rejection_response(rejection),
    };

    let flag = CancellationFlag::new();
    let guard = flag.drop_guard();
    let solver = state.solver.clone().with_cancellation(flag);

    let joined = tokio::task::spawn_blocking(move || solver.solve_all(&requests)).await;
    guard.disarm();

    match joined {
        Ok(results) => {
            let body: Vec<ApiResponse<FlowTrace>> = results
                .into_iter()
                .map(|r| match r {
                    Ok(trace) => ApiResponse::success(trace),
                    Err(e) => ApiResponse::error(&public_message(&e)),
                })
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "批量求解任务异常终止");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("内部错误")),
            )
                .into_response()
        }
    }
}

/// 内部错误不向调用方暴露细节
fn public_message(e: &Error) -> String {
    if e.is_user_facing() {
        e.to_string()
    } else {
        "内部错误".to_string()
    }
}

/// 请求体无法解析为求解请求，与校验失败一样按 400 返回
fn rejection_response(rejection: JsonRejection) -> Response {
    let message = rejection.body_text();
    warn!(status = %rejection.status(), %message, "请求体解析失败");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(&message)),
    )
        .into_response()
}

fn error_response(e: &Error) -> Response {
    let status = match e {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::ResourceExhausted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::<()>::error(&public_message(e)))).into_response()
}

/// API 响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
