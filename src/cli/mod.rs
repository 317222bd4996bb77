//! 命令行输出模块

mod printer;

pub use printer::{format_capacity, PrintMode, Printer};
