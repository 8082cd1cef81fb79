//! FlowTrace CLI 工具
//!
//! 从文件读取图，计算最大流并打印迭代轨迹

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use flowtrace::algorithm::EdmondsKarp;
use flowtrace::cli::{print_summary, PrintMode, Printer};
use flowtrace::config::SolverConfig;
use flowtrace::import::{load_request_json, ArcListImporter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// 与 HTTP 请求体相同的 JSON
    Json,
    /// source,target,capacity 弧列表
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "flowtrace-cli")]
#[command(about = "FlowTrace 命令行工具")]
struct Args {
    /// 输入文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式
    #[arg(short, long, value_enum, default_value = "json")]
    format: InputFormat,

    /// 源点（CSV 必填；JSON 中给出时覆盖文件内的值）
    #[arg(short, long)]
    source: Option<String>,

    /// 汇点（CSV 必填；JSON 中给出时覆盖文件内的值）
    #[arg(short = 't', long)]
    sink: Option<String>,

    /// 最大增广次数
    #[arg(short, long)]
    max_iterations: Option<usize>,

    /// 只打印指定下标的迭代
    #[arg(long)]
    iteration: Option<usize>,

    /// 垂直显示
    #[arg(long)]
    vertical: bool,

    /// 输出 JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowtrace=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut request = match args.format {
        InputFormat::Json => load_request_json(&args.input)
            .with_context(|| format!("读取 {:?} 失败", args.input))?,
        InputFormat::Csv => {
            let (Some(source), Some(sink)) = (args.source.clone(), args.sink.clone()) else {
                bail!("CSV 输入需要 --source 和 --sink");
            };
            let (request, stats) = ArcListImporter::new(source, sink)
                .import_csv(&args.input)
                .with_context(|| format!("导入 {:?} 失败", args.input))?;
            tracing::info!(
                nodes = stats.nodes_declared,
                arcs = stats.arcs_imported,
                duration_ms = stats.duration_ms,
                "导入完成"
            );
            request
        }
    };
    if let Some(source) = args.source {
        request.source = Some(source);
    }
    if let Some(sink) = args.sink {
        request.sink = Some(sink);
    }

    let mut config = SolverConfig::new();
    if let Some(limit) = args.max_iterations {
        config = config.with_max_iterations(limit);
    }

    let trace = EdmondsKarp::new(config).solve(&request)?;

    let printer = Printer::new(if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    });

    match (args.iteration, args.json) {
        (Some(i), json) => {
            let Some(snapshot) = trace.snapshot(i) else {
                bail!("迭代 {} 不存在（共 {} 次迭代）", i, trace.iterations());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(snapshot)?);
            } else {
                print!("{}", printer.print_snapshot(snapshot));
                print!("{}", print_summary(&trace));
            }
        }
        (None, true) => println!("{}", serde_json::to_string_pretty(&trace)?),
        (None, false) => print!("{}", printer.print_trace(&trace)),
    }

    Ok(())
}
