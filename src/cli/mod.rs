//! 命令行输出

mod printer;

pub use printer::{print_summary, PrintMode, Printer};
