//! # 运行配置
//!
//! 由命令行参数一次性构造、随后只读的配置结构，按引用传入各处理阶段。
//!
//! ## 依赖关系
//! - 使用 `cli/` 定义的参数结构
//! - 被 `commands/` 使用

use crate::cli::pipeline::{EchemArgs, ScanArgs, TransformArgs};
use crate::cli::plot::{ImageFormat, PlotArgs};
use crate::error::{OperandoError, Result};
use crate::models::{EchemFormat, Technique};
use crate::xrd::colormap::Colormap;

use std::path::PathBuf;

/// GC 电压轴默认范围 (V)
pub const DEFAULT_GC_BOUNDS: (f64, f64) = (1.3, 3.8);
/// CV 电流轴默认范围 (mA)
pub const DEFAULT_CV_BOUNDS: (f64, f64) = (-1.2, 1.0);

/// XRD 扫描来源
#[derive(Debug, Clone)]
pub struct ScanSource {
    pub dir: PathBuf,
    /// 不带前导点的扩展名
    pub extension: String,
    pub max_files: Option<usize>,
}

impl ScanSource {
    pub fn from_args(args: &ScanArgs) -> Result<Self> {
        let extension = args.extension.trim().trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(OperandoError::ConfigurationError(
                "scan file extension must not be empty".to_string(),
            ));
        }
        if args.max_files == Some(0) {
            return Err(OperandoError::ConfigurationError(
                "--max-files must be at least 1".to_string(),
            ));
        }
        Ok(ScanSource {
            dir: args.xrd_dir.clone(),
            extension,
            max_files: args.max_files,
        })
    }
}

/// 强度矩阵变换选项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOptions {
    /// 波长 (Å)
    pub wavelength: f64,
    pub to_q: bool,
    pub normalize: bool,
    /// 差分参考扫描序号
    pub differential_ref: Option<usize>,
}

impl From<&TransformArgs> for TransformOptions {
    fn from(args: &TransformArgs) -> Self {
        TransformOptions {
            wavelength: args.wavelength,
            to_q: args.to_q,
            normalize: args.normalize,
            differential_ref: args.differential,
        }
    }
}

/// 电化学记录来源
#[derive(Debug, Clone)]
pub struct EchemSource {
    pub path: PathBuf,
    pub technique: Technique,
    pub format: EchemFormat,
    pub ion: String,
    /// 覆盖总时长（小时）
    pub max_time: Option<f64>,
}

impl EchemSource {
    /// 未指定 `--echem` 时返回 `None`
    pub fn from_args(args: &EchemArgs) -> Result<Option<Self>> {
        if let Some(t) = args.max_time {
            if !t.is_finite() || t < 0.0 {
                return Err(OperandoError::ConfigurationError(format!(
                    "--max-time must be a non-negative number of hours, got {}",
                    t
                )));
            }
        }
        Ok(args.echem.as_ref().map(|path| EchemSource {
            path: path.clone(),
            technique: args.technique,
            format: args.echem_format,
            ion: args.ion.clone(),
            max_time: args.max_time,
        }))
    }
}

/// 作图选项
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub intensity_bounds: (f64, f64),
    pub levels: usize,
    /// 电化学面板横轴范围（GC 为电压，CV 为电流）
    pub signal_bounds: (f64, f64),
    pub x_range: Option<(f64, f64)>,
    /// 纵轴为时间（否则为扫描序号）
    pub time_on_y: bool,
    pub colormap: Colormap,
    pub battery_id: String,
    pub count: Option<u32>,
    pub output_dir: PathBuf,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// 完整运行配置
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scans: ScanSource,
    pub transforms: TransformOptions,
    pub echem: EchemSource,
    pub plot: PlotOptions,
}

impl RunConfig {
    pub fn from_plot_args(args: &PlotArgs) -> Result<Self> {
        let scans = ScanSource::from_args(&args.scans)?;
        let transforms = TransformOptions::from(&args.transforms);
        let echem = EchemSource::from_args(&args.echem)?.ok_or_else(|| {
            OperandoError::ConfigurationError(
                "missing input path: --echem is required for plotting".to_string(),
            )
        })?;

        if !(args.min_intensity < args.max_intensity) {
            return Err(OperandoError::ConfigurationError(format!(
                "intensity bounds must satisfy min < max, got {} .. {}",
                args.min_intensity, args.max_intensity
            )));
        }
        if args.levels < 2 {
            return Err(OperandoError::ConfigurationError(
                "--levels must be at least 2".to_string(),
            ));
        }

        let defaults = default_signal_bounds(echem.technique);
        let signal_bounds = (
            args.min_potential.unwrap_or(defaults.0),
            args.max_potential.unwrap_or(defaults.1),
        );
        if !(signal_bounds.0 < signal_bounds.1) {
            return Err(OperandoError::ConfigurationError(format!(
                "potential/current bounds must satisfy min < max, got {} .. {}",
                signal_bounds.0, signal_bounds.1
            )));
        }

        let x_range = args.x_range.as_deref().map(parse_range).transpose()?;

        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| scans.dir.join("Figures"));

        let plot = PlotOptions {
            intensity_bounds: (args.min_intensity, args.max_intensity),
            levels: args.levels,
            signal_bounds,
            x_range,
            time_on_y: !args.scan_index,
            colormap: args.colormap,
            battery_id: args.battery_id.clone(),
            count: args.count,
            output_dir,
            format: args.format,
            width: args.width,
            height: args.height,
        };

        Ok(RunConfig {
            scans,
            transforms,
            echem,
            plot,
        })
    }
}

/// 技术对应的电化学横轴默认范围
pub fn default_signal_bounds(technique: Technique) -> (f64, f64) {
    match technique {
        Technique::Gc => DEFAULT_GC_BOUNDS,
        Technique::Cv => DEFAULT_CV_BOUNDS,
    }
}

/// 解析横轴范围 (e.g., "1.15-3")
pub fn parse_range(range: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = range.split('-').collect();
    if parts.len() != 2 {
        return Err(OperandoError::InvalidRange(range.to_string()));
    }

    let min: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| OperandoError::InvalidRange(range.to_string()))?;
    let max: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| OperandoError::InvalidRange(range.to_string()))?;

    if min < 0.0 || max <= min {
        return Err(OperandoError::InvalidRange(format!(
            "{} (must be 0 <= min < max)",
            range
        )));
    }

    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn plot_args(extra: &[&str]) -> PlotArgs {
        let mut argv = vec!["operando", "plot", "/data/xrd"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Plot(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("1.15-3").unwrap(), (1.15, 3.0));
        assert_eq!(parse_range("7.25 - 22").unwrap(), (7.25, 22.0));
        assert!(parse_range("3-1").is_err());
        assert!(parse_range("abc").is_err());
        assert!(parse_range("1-2-3").is_err());
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::from_plot_args(&plot_args(&["--echem", "/data/gc.mpt"])).unwrap();
        assert_eq!(config.plot.signal_bounds, DEFAULT_GC_BOUNDS);
        assert_eq!(config.plot.output_dir, PathBuf::from("/data/xrd/Figures"));
        assert!(config.plot.time_on_y);
        assert_eq!(config.scans.extension, "xy");
        assert_eq!(config.transforms.differential_ref, None);
    }

    #[test]
    fn test_run_config_cv_bounds() {
        let config = RunConfig::from_plot_args(&plot_args(&[
            "--echem",
            "/data/cv.mpt",
            "--technique",
            "cv",
            "--max-potential",
            "2.0",
        ]))
        .unwrap();
        assert_eq!(config.plot.signal_bounds, (-1.2, 2.0));
    }

    #[test]
    fn test_run_config_requires_echem() {
        let err = RunConfig::from_plot_args(&plot_args(&[])).unwrap_err();
        assert!(matches!(err, OperandoError::ConfigurationError(_)));
    }

    #[test]
    fn test_run_config_rejects_inverted_intensity() {
        let err = RunConfig::from_plot_args(&plot_args(&[
            "--echem",
            "/data/gc.mpt",
            "--min-intensity",
            "5",
            "--max-intensity",
            "1",
        ]))
        .unwrap_err();
        assert!(matches!(err, OperandoError::ConfigurationError(_)));
    }

    #[test]
    fn test_scan_source_rejects_zero_limit() {
        let args = plot_args(&["--max-files", "0", "-e", ".xye"]);
        assert!(ScanSource::from_args(&args.scans).is_err());

        let args = plot_args(&["-e", ".xye"]);
        assert_eq!(ScanSource::from_args(&args.scans).unwrap().extension, "xye");
    }
}
