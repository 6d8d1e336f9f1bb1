//! # export 子命令 CLI 定义
//!
//! 将（变换后的）XRD 强度矩阵导出为 CSV。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/export.rs`

use super::pipeline::{EchemArgs, ScanArgs, TransformArgs};

use clap::Args;
use std::path::PathBuf;

/// export 子命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub scans: ScanArgs,

    #[command(flatten)]
    pub transforms: TransformArgs,

    /// Electrochemistry source; when given, scan columns are labelled with elapsed time
    #[command(flatten)]
    pub echem: EchemArgs,

    /// Output CSV file
    #[arg(short, long, default_value = "operando_matrix.csv")]
    pub output: PathBuf,

    /// Overwrite an existing output file
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
