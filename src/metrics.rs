//! 性能指标收集模块
//!
//! 提供求解请求的运行时指标收集和导出功能

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 一次求解的结局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Succeeded,
    /// 请求校验失败
    Rejected,
    /// 超过迭代上限
    Exhausted,
    Cancelled,
    /// 内部错误
    Failed,
}

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 求解统计
    solve_stats: SolveStats,
    /// 启动时间
    start_time: Instant,
}

/// 求解统计
#[derive(Debug, Default)]
struct SolveStats {
    total: AtomicU64,
    succeeded: AtomicU64,
    rejected: AtomicU64,
    exhausted: AtomicU64,
    cancelled: AtomicU64,
    failed: AtomicU64,
    /// 累计增广次数
    iterations: AtomicU64,
    /// 求解总耗时（微秒）
    total_duration_us: AtomicU64,
    /// 慢求解数（>1s）
    slow: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_solves: u64,
    pub succeeded_solves: u64,
    pub rejected_solves: u64,
    pub exhausted_solves: u64,
    pub cancelled_solves: u64,
    pub failed_solves: u64,
    pub total_iterations: u64,
    pub avg_iterations: f64,
    pub avg_solve_duration_ms: f64,
    pub slow_solves: u64,
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            solve_stats: SolveStats::default(),
            start_time: Instant::now(),
        }
    }

    /// 记录求解开始
    pub fn record_solve_start(&self) -> SolveTimer {
        self.solve_stats.total.fetch_add(1, Ordering::Relaxed);
        SolveTimer::new()
    }

    /// 记录求解结束
    pub fn record_solve_complete(&self, timer: SolveTimer, outcome: SolveOutcome, iterations: usize) {
        let duration = timer.elapsed();
        let stats = &self.solve_stats;

        let counter = match outcome {
            SolveOutcome::Succeeded => &stats.succeeded,
            SolveOutcome::Rejected => &stats.rejected,
            SolveOutcome::Exhausted => &stats.exhausted,
            SolveOutcome::Cancelled => &stats.cancelled,
            SolveOutcome::Failed => &stats.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        stats
            .iterations
            .fetch_add(iterations as u64, Ordering::Relaxed);
        stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        // 慢求解：超过1秒
        if duration.as_secs() >= 1 {
            stats.slow.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let stats = &self.solve_stats;
        let total = stats.total.load(Ordering::Relaxed);
        let succeeded = stats.succeeded.load(Ordering::Relaxed);
        let iterations = stats.iterations.load(Ordering::Relaxed);
        let total_duration_us = stats.total_duration_us.load(Ordering::Relaxed);

        let avg_solve_duration_ms = if total > 0 {
            (total_duration_us as f64) / (total as f64) / 1000.0
        } else {
            0.0
        };

        let avg_iterations = if succeeded > 0 {
            (iterations as f64) / (succeeded as f64)
        } else {
            0.0
        };

        MetricsSnapshot {
            total_solves: total,
            succeeded_solves: succeeded,
            rejected_solves: stats.rejected.load(Ordering::Relaxed),
            exhausted_solves: stats.exhausted.load(Ordering::Relaxed),
            cancelled_solves: stats.cancelled.load(Ordering::Relaxed),
            failed_solves: stats.failed.load(Ordering::Relaxed),
            total_iterations: iterations,
            avg_iterations,
            avg_solve_duration_ms,
            slow_solves: stats.slow.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let mut content = String::new();
        let mut push = |name: &str, kind: &str, help: &str, value: String| {
            content.push_str(&format!("# HELP flowtrace_{} {}\n", name, help));
            content.push_str(&format!("# TYPE flowtrace_{} {}\n", name, kind));
            content.push_str(&format!("flowtrace_{} {}\n", name, value));
        };

        push(
            "solves_total",
            "counter",
            "Total number of max-flow solves",
            snapshot.total_solves.to_string(),
        );
        push(
            "solves_succeeded_total",
            "counter",
            "Number of successful solves",
            snapshot.succeeded_solves.to_string(),
        );
        push(
            "solves_rejected_total",
            "counter",
            "Number of requests rejected by validation",
            snapshot.rejected_solves.to_string(),
        );
        push(
            "solves_exhausted_total",
            "counter",
            "Number of solves that exceeded the iteration cap",
            snapshot.exhausted_solves.to_string(),
        );
        push(
            "solves_cancelled_total",
            "counter",
            "Number of cancelled solves",
            snapshot.cancelled_solves.to_string(),
        );
        push(
            "solves_failed_total",
            "counter",
            "Number of solves aborted by an internal error",
            snapshot.failed_solves.to_string(),
        );
        push(
            "iterations_total",
            "counter",
            "Total augmenting iterations",
            snapshot.total_iterations.to_string(),
        );
        push(
            "solve_duration_avg_ms",
            "gauge",
            "Average solve duration in milliseconds",
            format!("{:.2}", snapshot.avg_solve_duration_ms),
        );
        push(
            "slow_solves_total",
            "counter",
            "Number of slow solves (>1s)",
            snapshot.slow_solves.to_string(),
        );
        push(
            "uptime_seconds",
            "counter",
            "System uptime in seconds",
            snapshot.uptime_seconds.to_string(),
        );

        PrometheusMetrics { content }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 求解计时器
pub struct SolveTimer {
    start: Instant,
}

impl SolveTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}
