//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，以及 plot/export 共用的流程步骤。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `models/`, `xrd/`, `utils/`
//! - 子模块: plot, echem, export

pub mod echem;
pub mod export;
pub mod plot;

use crate::cli::Commands;
use crate::error::{OperandoError, Result};
use crate::models::{EchemSeries, EchemSource, IntensityMatrix, ScanSource, TransformOptions};
use crate::parsers;
use crate::utils::output;
use crate::xrd::{builder, transform, ScanCollector};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Plot(args) => plot::execute(args),
        Commands::Echem(args) => echem::execute(args),
        Commands::Export(args) => export::execute(args),
    }
}

/// 读取电化学记录，返回序列与纵轴总时长
pub(crate) fn load_echem(source: &EchemSource) -> Result<(EchemSeries, f64)> {
    let series = parsers::parse_echem_file(&source.path, source.technique, source.format)?;
    output::print_info(&format!(
        "Loaded {} {} points from '{}' ({} layout)",
        series.len(),
        series.technique(),
        source.path.display(),
        series.layout()
    ));

    let total = match source.max_time {
        Some(t) => t,
        None => series.duration().ok_or_else(|| {
            OperandoError::ConfigurationError("electrochemistry series is empty".to_string())
        })?,
    };
    Ok((series, total))
}

/// 收集扫描、构建强度矩阵并施加变换
pub(crate) fn load_matrix(
    scans: &ScanSource,
    transforms: &TransformOptions,
) -> Result<IntensityMatrix> {
    let collector = ScanCollector::from_source(scans);
    let files = collector.collect()?;
    output::print_info(&format!(
        "Found {} scan files matching '{}' in '{}'",
        files.len(),
        collector.pattern(),
        scans.dir.display()
    ));

    let mut matrix = builder::build_matrix(&files)?;
    transform::apply(&mut matrix, transforms)?;

    if transforms.to_q {
        output::print_info(&format!(
            "Converted 2θ to Q with λ = {:.4} Å",
            transforms.wavelength
        ));
    }
    if let Some(reference) = transforms.differential_ref {
        output::print_info(&format!("Subtracted reference scan {}", reference));
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AxisKind, EchemFormat, Technique};
    use std::fs;
    use std::path::Path;

    /// 网格 [10, 20, 30]；自然排序下 scan10 应排在最后
    pub(crate) fn write_scans(dir: &Path) {
        fs::write(dir.join("scan1.xy"), "10 1\n20 2\n30 3\n").unwrap();
        fs::write(dir.join("scan2.xy"), "10 2\n20 4\n30 6\n").unwrap();
        fs::write(dir.join("scan10.xy"), "10 1\n20 1\n30 1\n").unwrap();
    }

    fn source(dir: &Path) -> ScanSource {
        ScanSource {
            dir: dir.to_path_buf(),
            extension: "xy".to_string(),
            max_files: None,
        }
    }

    #[test]
    fn test_load_matrix_q_and_normalize() {
        let dir = tempfile::tempdir().unwrap();
        write_scans(dir.path());

        let transforms = TransformOptions {
            wavelength: 0.7093,
            to_q: true,
            normalize: true,
            differential_ref: None,
        };
        let matrix = load_matrix(&source(dir.path()), &transforms).unwrap();

        assert_eq!(matrix.axis_kind(), AxisKind::Q);
        assert!((matrix.axis()[0] - 1.5441).abs() < 1e-3);
        assert_eq!(matrix.n_scans(), 3);

        let expected = [1.0 / 3.0, 2.0 / 3.0, 1.0];
        for (value, want) in matrix.column(1).iter().zip(expected) {
            assert!((value - want).abs() < 1e-9);
        }
        // scan10 为全 1 列，归一化后不变
        assert!(matrix.column(2).iter().all(|&v| (v - 1.0).abs() < 1e-12));
        assert!((matrix.value(0, 0) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_matrix_bad_reference() {
        let dir = tempfile::tempdir().unwrap();
        write_scans(dir.path());

        let transforms = TransformOptions {
            wavelength: 0.7093,
            to_q: false,
            normalize: false,
            differential_ref: Some(3),
        };
        let err = load_matrix(&source(dir.path()), &transforms).unwrap_err();
        assert!(matches!(err, OperandoError::ConfigurationError(_)));
    }

    #[test]
    fn test_load_echem_duration_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gc.txt");
        fs::write(&path, "0\t3.0\n4.5\t3.4\n").unwrap();

        let mut echem = EchemSource {
            path,
            technique: Technique::Gc,
            format: EchemFormat::Auto,
            ion: "Na".to_string(),
            max_time: None,
        };
        let (series, total) = load_echem(&echem).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(total, 4.5);

        echem.max_time = Some(21.7);
        assert_eq!(load_echem(&echem).unwrap().1, 21.7);
    }
}
