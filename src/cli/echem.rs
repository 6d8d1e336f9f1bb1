//! # echem 子命令 CLI 定义
//!
//! 单独解析电化学记录文件，打印摘要并可导出为 CSV。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/echem.rs`

use crate::models::{EchemFormat, Technique};

use clap::Args;
use std::path::PathBuf;

/// echem 子命令参数
#[derive(Args, Debug)]
pub struct EchemCommandArgs {
    /// Electrochemistry log file
    pub input: PathBuf,

    /// Electrochemical technique
    #[arg(long, value_enum, default_value = "gc")]
    pub technique: Technique,

    /// Electrochemistry file layout
    #[arg(long, value_enum, default_value = "auto")]
    pub echem_format: EchemFormat,

    /// Write the parsed series to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of leading and trailing rows to preview
    #[arg(long, default_value_t = 5)]
    pub preview: usize,
}
