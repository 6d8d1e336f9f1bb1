//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `plot`: 原位 XRD + 电化学联合作图（完整流程）
//! - `echem`: 解析电化学记录并汇总/导出
//! - `export`: 导出（变换后的）强度矩阵为 CSV
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: pipeline（共享参数）, plot, echem, export

pub mod echem;
pub mod export;
pub mod pipeline;
pub mod plot;

use clap::{Parser, Subcommand};

/// operando - 原位 XRD 与电化学数据联合处理工具
#[derive(Parser)]
#[command(name = "operando")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Operando XRD processing: align diffraction scans with electrochemistry and plot them",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Build the operando contour figure from XRD scans and an electrochemistry log
    Plot(plot::PlotArgs),

    /// Parse an electrochemistry log, print a summary and optionally export it
    Echem(echem::EchemCommandArgs),

    /// Export the (transformed) XRD intensity matrix to CSV
    Export(export::ExportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Technique;

    #[test]
    fn test_parse_plot_command() {
        let cli = Cli::try_parse_from([
            "operando",
            "plot",
            "/data/xrd",
            "--echem",
            "/data/gc.mpt",
            "--to-q",
            "--normalize",
            "--differential",
            "3",
            "--min-intensity",
            "-0.5",
            "--max-intensity",
            "0.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Plot(args) => {
                assert_eq!(args.scans.xrd_dir.to_str(), Some("/data/xrd"));
                assert_eq!(args.scans.extension, "xy");
                assert!(args.transforms.to_q);
                assert!(args.transforms.normalize);
                assert_eq!(args.transforms.differential, Some(3));
                assert!((args.transforms.wavelength - 0.7093).abs() < 1e-12);
                assert_eq!(args.echem.technique, Technique::Gc);
                assert_eq!(args.min_intensity, -0.5);
            }
            _ => panic!("expected plot command"),
        }
    }

    #[test]
    fn test_parse_named_wavelength() {
        let cli = Cli::try_parse_from([
            "operando", "export", "/data/xrd", "-w", "cu-ka1", "-e", "xye",
        ])
        .unwrap();

        match cli.command {
            Commands::Export(args) => {
                assert!((args.transforms.wavelength - 1.5406).abs() < 1e-12);
                assert_eq!(args.scans.extension, "xye");
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_reject_bad_wavelength() {
        assert!(Cli::try_parse_from(["operando", "export", "/data", "-w", "laser"]).is_err());
    }
}
