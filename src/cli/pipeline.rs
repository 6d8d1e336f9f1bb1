//! # 共享参数定义
//!
//! `plot` 与 `export` 共用的扫描源、变换和电化学参数组，
//! 通过 `#[command(flatten)]` 嵌入各子命令。
//!
//! ## 依赖关系
//! - 被 `cli/plot.rs`, `cli/export.rs` 使用
//! - 由 `models/config.rs` 转换为不可变配置

use crate::models::{EchemFormat, Technique};

use clap::Args;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 波长
// ─────────────────────────────────────────────────────────────

/// 预定义辐射源波长 (Å)
pub fn get_predefined_wavelength(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "cu-ka" | "cuka" => Some(1.5418),
        "cu-ka1" | "cuka1" => Some(1.5406),
        "cu-ka2" | "cuka2" => Some(1.5444),
        "mo-ka" | "moka" => Some(0.7107),
        "mo-ka1" | "moka1" => Some(0.7093),
        "co-ka" | "coka" => Some(1.7903),
        "fe-ka" | "feka" => Some(1.9373),
        "ag-ka" | "agka" => Some(0.5609),
        _ => None,
    }
}

/// 解析波长输入（辐射源名称或数值）
pub fn parse_wavelength(input: &str) -> Result<f64, String> {
    if let Some(wl) = get_predefined_wavelength(input) {
        return Ok(wl);
    }
    let value = input.parse::<f64>().map_err(|_| {
        format!(
            "Invalid wavelength '{}'. Use a number in Å (e.g., 0.24468) or a name: mo-ka1, mo-ka, cu-ka, cu-ka1, co-ka, fe-ka, ag-ka",
            input
        )
    })?;
    if !(value.is_finite() && value > 0.0) {
        return Err(format!("Wavelength must be positive, got {}", input));
    }
    Ok(value)
}

// ─────────────────────────────────────────────────────────────
// 参数组
// ─────────────────────────────────────────────────────────────

/// XRD 扫描文件来源
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory containing the XRD scan files
    pub xrd_dir: PathBuf,

    /// Scan file extension (e.g., "xy" home-lab, "xye" synchrotron, "dat" BM01)
    #[arg(short, long, default_value = "xy")]
    pub extension: String,

    /// Maximum number of scans to load (in natural filename order)
    #[arg(long)]
    pub max_files: Option<usize>,
}

/// 强度矩阵变换
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// X-ray wavelength: radiation source name (mo-ka1, cu-ka, ...) or value in Å
    #[arg(short, long, default_value = "0.7093", value_parser = parse_wavelength)]
    pub wavelength: f64,

    /// Convert the 2θ axis to momentum transfer Q
    #[arg(long, visible_alias = "q", default_value_t = false)]
    pub to_q: bool,

    /// Normalize every scan to its own maximum intensity
    #[arg(long, default_value_t = false)]
    pub normalize: bool,

    /// Display differential XRD: subtract the scan with this 0-based index from every scan
    #[arg(long, value_name = "REF")]
    pub differential: Option<usize>,
}

/// 电化学记录来源
#[derive(Args, Debug)]
pub struct EchemArgs {
    /// Electrochemistry log (.mpt Biologic, .txt BatSmall, or BATX with --echem-format batx)
    #[arg(long)]
    pub echem: Option<PathBuf>,

    /// Electrochemical technique
    #[arg(long, value_enum, default_value = "gc")]
    pub technique: Technique,

    /// Electrochemistry file layout
    #[arg(long, value_enum, default_value = "auto")]
    pub echem_format: EchemFormat,

    /// Working ion, used in the potential axis label (e.g., Li, Na, K)
    #[arg(long, default_value = "Na")]
    pub ion: String,

    /// Override the total experiment duration in hours (default: last electrochemistry time)
    #[arg(long)]
    pub max_time: Option<f64>,
}
