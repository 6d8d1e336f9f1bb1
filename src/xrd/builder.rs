//! # 强度矩阵构建
//!
//! 按顺序读取扫描文件，校验共享角度格点，拼接为 [角度, 扫描] 强度矩阵。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs`, `commands/export.rs` 调用
//! - 使用 `parsers/scan.rs` 读取文件
//! - 使用 `utils/progress.rs` 显示进度

use crate::error::{OperandoError, Result};
use crate::models::{IntensityMatrix, ScanFile};
use crate::parsers::scan::load_scan_file;
use crate::utils::progress;

use log::debug;
use ndarray::Array2;
use std::path::PathBuf;

/// 角度格点比较容差（度）
pub const GRID_TOLERANCE: f64 = 1e-6;

/// 依次读取扫描文件，序号即列表顺序
pub fn load_scans(files: &[PathBuf]) -> Result<Vec<ScanFile>> {
    let pb = progress::create_progress_bar(files.len() as u64, "Loading scans");

    let scans = files
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let scan = load_scan_file(path, index);
            pb.inc(1);
            scan
        })
        .collect::<Result<Vec<_>>>();

    pb.finish_and_clear();
    scans
}

/// 校验所有扫描与第一个扫描共享同一角度格点
pub fn check_shared_grid(scans: &[ScanFile]) -> Result<()> {
    let Some(reference) = scans.first() else {
        return Ok(());
    };

    for scan in &scans[1..] {
        if scan.len() != reference.len() {
            return Err(OperandoError::GridMismatch {
                path: scan.path.display().to_string(),
                reason: format!(
                    "{} angle points, but {} has {}",
                    scan.len(),
                    reference.file_name(),
                    reference.len()
                ),
            });
        }

        let mismatch = reference
            .angles()
            .zip(scan.angles())
            .enumerate()
            .find(|(_, (a, b))| (a - b).abs() > GRID_TOLERANCE);

        if let Some((row, (expected, found))) = mismatch {
            return Err(OperandoError::GridMismatch {
                path: scan.path.display().to_string(),
                reason: format!(
                    "point {} is at {} but {} has {}",
                    row,
                    found,
                    reference.file_name(),
                    expected
                ),
            });
        }
    }

    Ok(())
}

/// 拼接强度矩阵：列顺序即扫描顺序，行轴取第一个扫描的角度
pub fn assemble(scans: &[ScanFile]) -> Result<IntensityMatrix> {
    let Some(first) = scans.first() else {
        return Err(OperandoError::ConfigurationError(
            "no scans to assemble".to_string(),
        ));
    };
    check_shared_grid(scans)?;

    let axis: Vec<f64> = first.angles().collect();
    let data = Array2::from_shape_fn((axis.len(), scans.len()), |(row, col)| {
        scans[col].points[row].1
    });

    debug!(
        "assembled intensity matrix: {} angle points x {} scans",
        axis.len(),
        scans.len()
    );
    Ok(IntensityMatrix::new(axis, data))
}

/// 读取并拼接
pub fn build_matrix(files: &[PathBuf]) -> Result<IntensityMatrix> {
    let scans = load_scans(files)?;
    assemble(&scans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(index: usize, points: &[(f64, f64)]) -> ScanFile {
        ScanFile::new(
            index,
            PathBuf::from(format!("scan{}.xy", index + 1)),
            points.to_vec(),
        )
    }

    #[test]
    fn test_assemble_columns_in_order() {
        let scans = vec![
            scan(0, &[(10.0, 1.0), (20.0, 2.0), (30.0, 3.0)]),
            scan(1, &[(10.0, 2.0), (20.0, 4.0), (30.0, 6.0)]),
            scan(2, &[(10.0, 1.0), (20.0, 1.0), (30.0, 1.0)]),
        ];
        let m = assemble(&scans).unwrap();
        assert_eq!(m.axis(), &[10.0, 20.0, 30.0]);
        assert_eq!(m.n_scans(), 3);
        assert_eq!(m.column(1).to_vec(), vec![2.0, 4.0, 6.0]);
        assert_eq!(m.value(2, 0), 3.0);
    }

    #[test]
    fn test_grid_length_mismatch() {
        let scans = vec![
            scan(0, &[(10.0, 1.0), (20.0, 2.0)]),
            scan(1, &[(10.0, 1.0)]),
        ];
        let err = assemble(&scans).unwrap_err();
        match err {
            OperandoError::GridMismatch { path, .. } => assert_eq!(path, "scan2.xy"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_grid_value_mismatch() {
        let scans = vec![
            scan(0, &[(10.0, 1.0), (20.0, 2.0)]),
            scan(1, &[(10.0, 1.0), (20.0, 2.0)]),
            scan(2, &[(10.0, 1.0), (20.5, 2.0)]),
        ];
        let err = assemble(&scans).unwrap_err();
        assert!(matches!(err, OperandoError::GridMismatch { .. }));
        assert!(err.to_string().contains("scan3.xy"));
    }

    #[test]
    fn test_grid_within_tolerance() {
        let scans = vec![
            scan(0, &[(10.0, 1.0), (20.0, 2.0)]),
            scan(1, &[(10.0 + 1e-9, 1.0), (20.0, 2.0)]),
        ];
        assert!(assemble(&scans).is_ok());
    }

    #[test]
    fn test_assemble_empty() {
        assert!(assemble(&[]).is_err());
    }

    #[test]
    fn test_build_matrix_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Vec::new();
        for (i, body) in ["10 1\n20 2\n", "10 3\n20 4\n"].iter().enumerate() {
            let path = dir.path().join(format!("scan{}.xy", i));
            std::fs::write(&path, body).unwrap();
            files.push(path);
        }
        let m = build_matrix(&files).unwrap();
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.column(1).to_vec(), vec![3.0, 4.0]);
    }
}
