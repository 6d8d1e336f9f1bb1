//! # plot 子命令实现
//!
//! 完整流程：读取电化学记录 → 读取全部扫描 → 变换 → 合成时间轴 → 作图。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 PlotArgs
//! - 使用 `models/config.rs` 的 RunConfig
//! - 使用 `xrd/` 模块进行处理与绘制

use crate::cli::plot::PlotArgs;
use crate::error::{OperandoError, Result};
use crate::models::RunConfig;
use crate::utils::output;
use crate::xrd::plot::{self, OperandoFigure};
use crate::xrd::{timeaxis, TimeMode};

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// 执行作图
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("Operando XRD Contour Plot");

    let config = RunConfig::from_plot_args(&args)?;
    debug!("run configuration: {:?}", config);

    let (series, total_duration) = super::load_echem(&config.echem)?;
    let matrix = super::load_matrix(&config.scans, &config.transforms)?;

    let time_mode = if config.plot.time_on_y {
        TimeMode::Elapsed
    } else {
        TimeMode::ScanIndex
    };
    if let Some((lo, hi)) = matrix.intensity_range() {
        debug!("data intensity range {:.4} .. {:.4}", lo, hi);
        let (min, max) = config.plot.intensity_bounds;
        if hi < min || lo > max {
            output::print_warning(&format!(
                "Intensity bounds {} .. {} lie outside the data range {:.4} .. {:.4}",
                min, max, lo, hi
            ));
        }
    }

    let scan_axis = timeaxis::synthesize(total_duration, matrix.n_scans(), time_mode)?;
    if let Some(step) = timeaxis::scan_interval(total_duration, matrix.n_scans()) {
        if time_mode == TimeMode::Elapsed {
            output::print_info(&format!(
                "{} scans over {:.3} h ({:.4} h per scan)",
                matrix.n_scans(),
                total_duration,
                step
            ));
        }
    }

    let options = &config.plot;
    fs::create_dir_all(&options.output_dir).map_err(|e| OperandoError::FileWriteError {
        path: options.output_dir.display().to_string(),
        source: e,
    })?;

    let output_path = resolve_output_path(
        &options.output_dir,
        &options.battery_id,
        options.format.extension(),
        options.count,
    );

    let figure = OperandoFigure {
        matrix: &matrix,
        scan_axis: &scan_axis,
        time_mode,
        echem: &series,
        total_duration,
        ion: &config.echem.ion,
    };
    plot::render(&figure, options, &output_path)?;

    output::print_success(&format!("Figure saved to '{}'", output_path.display()));
    Ok(())
}

fn output_file_name(battery_id: &str, count: u32, extension: &str) -> String {
    format!("{}_operando_{}.{}", battery_id, count, extension)
}

/// 输出文件路径
///
/// 指定 `count` 时直接使用；否则取最小的、对应文件尚不存在的计数（≥ 1）。
pub fn resolve_output_path(
    dir: &Path,
    battery_id: &str,
    extension: &str,
    count: Option<u32>,
) -> PathBuf {
    if let Some(count) = count {
        return dir.join(output_file_name(battery_id, count, extension));
    }

    let mut count = 1;
    loop {
        let candidate = dir.join(output_file_name(battery_id, count, extension));
        if !candidate.exists() {
            return candidate;
        }
        count += 1;
    }
}
