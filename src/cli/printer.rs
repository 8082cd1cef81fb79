//! 结果打印器
//!
//! 以表格或垂直格式输出迭代快照

use crate::algorithm::{FlowTrace, MinCut, Snapshot};
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印完整轨迹
    pub fn print_trace(&self, trace: &FlowTrace) -> String {
        let mut output = String::new();

        if trace.snapshots.is_empty() {
            output.push_str("源点与汇点之间没有增广路径\n");
        }
        for snapshot in &trace.snapshots {
            output.push_str(&self.print_snapshot(snapshot));
            output.push('\n');
        }

        output.push_str(&self.print_min_cut(&trace.min_cut));
        output.push_str(&print_summary(trace));
        output
    }

    /// 打印单个快照，本轮增广路径上的弧高亮显示
    pub fn print_snapshot(&self, snapshot: &Snapshot) -> String {
        let path: Vec<String> = snapshot
            .path
            .iter()
            .map(|step| format!("{}->{}", step.from, step.to))
            .collect();

        let header = format!(
            "迭代 {}: 推送 {}，累计 {}\n路径: {}\n",
            snapshot.iteration,
            snapshot.bottleneck,
            snapshot.cumulative_flow,
            path.join(", ")
        );

        let columns = ["#", "Arc", "Flow/Capacity", "Residual"];
        let rows: Vec<(bool, Vec<String>)> = snapshot
            .arcs
            .iter()
            .map(|arc| {
                (
                    snapshot.path_uses(arc.id),
                    vec![
                        arc.id.to_string(),
                        format!("{} -> {}", arc.source, arc.target),
                        arc.label(),
                        arc.residual().to_string(),
                    ],
                )
            })
            .collect();

        let body = match self.mode {
            PrintMode::Table => format_table(&columns, &rows),
            PrintMode::Vertical => format_vertical(&columns, &rows),
        };

        format!("{}{}", header.bold(), body)
    }

    /// 打印最小割
    pub fn print_min_cut(&self, cut: &MinCut) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Source Side", cut.source_side.join(", ")]);
        table.add_row(row![
            "Cut Arcs",
            cut.arcs
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ]);
        table.add_row(row!["Cut Capacity", cut.capacity.to_string()]);
        table.to_string()
    }
}

/// 汇总行
pub fn print_summary(trace: &FlowTrace) -> String {
    format!(
        "{} {} ({} 次迭代)\n",
        "最大流:".green().bold(),
        trace.max_flow,
        trace.iterations()
    )
}

/// 表格格式
fn format_table(columns: &[&str], rows: &[(bool, Vec<String>)]) -> String {
    let mut table = Table::new();

    // 设置表格格式
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    // 添加表头
    let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
    table.set_titles(Row::new(header));

    // 添加数据行
    for (highlight, row_data) in rows {
        let cells: Vec<Cell> = row_data
            .iter()
            .map(|v| {
                let cell = Cell::new(v);
                if *highlight {
                    cell.style_spec("Fgb")
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(Row::new(cells));
    }

    table.to_string()
}

/// 垂直格式
fn format_vertical(columns: &[&str], rows: &[(bool, Vec<String>)]) -> String {
    let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (i, (highlight, row_data)) in rows.iter().enumerate() {
        let marker = if *highlight { " *" } else { "" };
        output.push_str(&format!(
            "*************************** {}. arc{} ***************************\n",
            i + 1,
            marker
        ));

        for (j, col) in columns.iter().enumerate() {
            let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
            output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
        }
    }

    output
}
