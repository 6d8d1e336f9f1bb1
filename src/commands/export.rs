//! # export 子命令实现
//!
//! 构建并变换强度矩阵后写出 CSV。提供电化学记录（或 `--max-time`）时
//! 扫描列以经过时间标注，否则以扫描序号标注。
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的 ExportArgs
//! - 使用 `xrd/` 模块进行处理与导出

use crate::cli::export::ExportArgs;
use crate::error::{OperandoError, Result};
use crate::models::{EchemSource, ScanSource, TransformOptions};
use crate::utils::output;
use crate::xrd::{export, timeaxis, TimeMode};

/// 执行矩阵导出
pub fn execute(args: ExportArgs) -> Result<()> {
    output::print_header("Operando XRD Matrix Export");

    if args.output.exists() && !args.overwrite {
        return Err(OperandoError::ConfigurationError(format!(
            "'{}' already exists (use --overwrite to replace it)",
            args.output.display()
        )));
    }

    let scans = ScanSource::from_args(&args.scans)?;
    let transforms = TransformOptions::from(&args.transforms);

    // 时间轴总时长：电化学记录优先，其次为单独给出的 --max-time
    let total_duration = match EchemSource::from_args(&args.echem)? {
        Some(source) => Some(super::load_echem(&source)?.1),
        None => args.echem.max_time,
    };

    let matrix = super::load_matrix(&scans, &transforms)?;

    let (time_mode, total) = match total_duration {
        Some(total) => (TimeMode::Elapsed, total),
        None => {
            output::print_warning("No electrochemistry given; columns are labelled by scan index");
            (TimeMode::ScanIndex, 0.0)
        }
    };
    let scan_axis = timeaxis::synthesize(total, matrix.n_scans(), time_mode)?;

    export::matrix_to_csv(&matrix, &scan_axis, time_mode, &args.output)?;
    output::print_success(&format!(
        "{} x {} matrix saved to '{}'",
        matrix.n_rows(),
        matrix.n_scans(),
        args.output.display()
    ));
    Ok(())
}
