//! # 数据导出
//!
//! - 强度矩阵 CSV：首列为横轴（2θ 或 Q），其后每个扫描一列，表头为扫描时间或序号
//! - 电化学序列 CSV：time_h, signal[, current_ma]
//!
//! ## 依赖关系
//! - 被 `commands/export.rs`, `commands/echem.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{OperandoError, Result};
use crate::models::{EchemSeries, IntensityMatrix, Technique};
use crate::xrd::timeaxis::TimeMode;

use serde::Serialize;
use std::path::Path;

fn flush_err(path: &Path) -> impl FnOnce(std::io::Error) -> OperandoError + '_ {
    move |e| OperandoError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    }
}

/// 扫描列的表头
fn scan_label(value: f64, mode: TimeMode) -> String {
    match mode {
        TimeMode::Elapsed => format!("{:.4}", value),
        TimeMode::ScanIndex => format!("{}", value as usize),
    }
}

/// 导出强度矩阵
pub fn matrix_to_csv(
    matrix: &IntensityMatrix,
    scan_axis: &[f64],
    time_mode: TimeMode,
    output_path: &Path,
) -> Result<()> {
    if scan_axis.len() != matrix.n_scans() {
        return Err(OperandoError::ConfigurationError(format!(
            "scan axis has {} entries for {} scans",
            scan_axis.len(),
            matrix.n_scans()
        )));
    }

    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = Vec::with_capacity(matrix.n_scans() + 1);
    header.push(matrix.axis_kind().column_name().to_string());
    header.extend(scan_axis.iter().map(|&v| scan_label(v, time_mode)));
    wtr.write_record(&header)?;

    for (row, x) in matrix.axis().iter().enumerate() {
        let mut record = Vec::with_capacity(matrix.n_scans() + 1);
        record.push(format!("{:.6}", x));
        record.extend(matrix.data().row(row).iter().map(|v| format!("{:.6}", v)));
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(flush_err(output_path))?;
    Ok(())
}

#[derive(Serialize)]
struct EchemRow {
    time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    voltage_v: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_ma: Option<f64>,
}

/// 导出电化学序列
///
/// GC 写出 time, voltage_v；CV 写出 time, voltage_v, current_ma。
pub fn echem_to_csv(series: &EchemSeries, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (i, (time, signal)) in series.points().enumerate() {
        let row = match series.technique() {
            Technique::Gc => EchemRow {
                time,
                voltage_v: Some(signal),
                current_ma: None,
            },
            Technique::Cv => EchemRow {
                time,
                voltage_v: series.companion().map(|v| v[i]),
                current_ma: Some(signal),
            },
        };
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(flush_err(output_path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AxisKind, EchemLayout};
    use ndarray::array;

    fn matrix() -> IntensityMatrix {
        IntensityMatrix::new(vec![10.0, 20.0], array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
    }

    #[test]
    fn test_matrix_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        matrix_to_csv(&matrix(), &[0.0, 1.5, 3.0], TimeMode::Elapsed, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "2theta,0.0000,1.5000,3.0000");
        assert_eq!(lines[1], "10.000000,1.000000,2.000000,3.000000");
        assert_eq!(lines[2], "20.000000,4.000000,5.000000,6.000000");
    }

    #[test]
    fn test_matrix_csv_scan_index_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        matrix_to_csv(&matrix(), &[0.0, 1.0, 2.0], TimeMode::ScanIndex, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("2theta,0,1,2\n"));
        assert_eq!(matrix().axis_kind(), AxisKind::TwoTheta);
    }

    #[test]
    fn test_matrix_csv_axis_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        let err = matrix_to_csv(&matrix(), &[0.0], TimeMode::ScanIndex, &path).unwrap_err();
        assert!(matches!(err, OperandoError::ConfigurationError(_)));
    }

    #[test]
    fn test_echem_csv_gc() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gc.csv");
        let series = EchemSeries::new(
            Technique::Gc,
            EchemLayout::Biologic,
            vec![0.0, 0.5],
            vec![2.5, 2.75],
            None,
        );
        echem_to_csv(&series, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "time,voltage_v\n0.0,2.5\n0.5,2.75\n");
    }

    #[test]
    fn test_echem_csv_cv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.csv");
        let series = EchemSeries::new(
            Technique::Cv,
            EchemLayout::Biologic,
            vec![0.0, 1.0],
            vec![0.25, -0.5],
            Some(vec![-1.0, 0.5]),
        );
        echem_to_csv(&series, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "time,voltage_v,current_ma");
        assert_eq!(lines[2], "1.0,0.5,-0.5");
    }
}
