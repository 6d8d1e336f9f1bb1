//! # plot 子命令 CLI 定义
//!
//! 原位 XRD 等高线图 + 电化学曲线的联合作图参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use super::pipeline::{EchemArgs, ScanArgs, TransformArgs};
use crate::xrd::colormap::Colormap;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG image
    #[default]
    Png,
    /// SVG vector image
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub scans: ScanArgs,

    #[command(flatten)]
    pub transforms: TransformArgs,

    #[command(flatten)]
    pub echem: EchemArgs,

    // ─────────────────────────────────────────────────────────────
    // 等高线图
    // ─────────────────────────────────────────────────────────────
    /// Lower intensity limit of the contour color scale
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub min_intensity: f64,

    /// Upper intensity limit of the contour color scale (higher values saturate)
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub max_intensity: f64,

    /// Number of distinct color levels between the intensity limits
    #[arg(long, default_value_t = 1000)]
    pub levels: usize,

    /// Contour x-axis range (e.g., "1.15-3" for Q, "7.25-22" for 2θ; default: full data range)
    #[arg(long)]
    pub x_range: Option<String>,

    /// Use the scan number instead of elapsed time on the contour y-axis
    #[arg(long, default_value_t = false)]
    pub scan_index: bool,

    /// Colormap for the contour plot
    #[arg(long, value_enum, default_value = "twilight_shifted")]
    pub colormap: Colormap,

    // ─────────────────────────────────────────────────────────────
    // 电化学面板
    // ─────────────────────────────────────────────────────────────
    /// Lower limit of the electrochemistry x-axis (V for GC, mA for CV)
    #[arg(long, allow_negative_numbers = true)]
    pub min_potential: Option<f64>,

    /// Upper limit of the electrochemistry x-axis (V for GC, mA for CV)
    #[arg(long, allow_negative_numbers = true)]
    pub max_potential: Option<f64>,

    // ─────────────────────────────────────────────────────────────
    // 输出
    // ─────────────────────────────────────────────────────────────
    /// Battery identifier used in the output file name
    #[arg(long, default_value = "battery")]
    pub battery_id: String,

    /// Run counter in the output file name (default: next unused number)
    #[arg(long)]
    pub count: Option<u32>,

    /// Destination directory (default: <XRD_DIR>/Figures)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output image format
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: ImageFormat,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1920)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1440)]
    pub height: u32,
}
