//! # 时间轴合成
//!
//! 假设扫描在整个电化学实验时长内等间隔分布，将扫描序号映射为经过时间；
//! 关闭时间对齐时使用原始扫描序号。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs`, `commands/export.rs` 调用

use crate::error::{OperandoError, Result};

/// 纵轴模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    /// 经过时间（小时）
    Elapsed,
    /// 扫描序号 0, 1, 2, ...
    ScanIndex,
}

impl TimeMode {
    pub fn label(&self) -> &'static str {
        match self {
            TimeMode::Elapsed => "Time (h)",
            TimeMode::ScanIndex => "Scan number",
        }
    }
}

/// 相邻扫描的时间间隔；单个扫描时为 `None`
pub fn scan_interval(total_duration: f64, scan_count: usize) -> Option<f64> {
    if scan_count < 2 {
        None
    } else {
        Some(total_duration / (scan_count - 1) as f64)
    }
}

/// 生成每个扫描对应的纵轴坐标
pub fn synthesize(total_duration: f64, scan_count: usize, mode: TimeMode) -> Result<Vec<f64>> {
    if scan_count == 0 {
        return Err(OperandoError::ConfigurationError(
            "scan count must be positive".to_string(),
        ));
    }

    match mode {
        TimeMode::ScanIndex => Ok((0..scan_count).map(|i| i as f64).collect()),
        TimeMode::Elapsed => {
            if !(total_duration.is_finite() && total_duration >= 0.0) {
                return Err(OperandoError::ConfigurationError(format!(
                    "total duration must be a non-negative number, got {}",
                    total_duration
                )));
            }
            let axis = match scan_interval(total_duration, scan_count) {
                None => vec![0.0],
                Some(step) => (0..scan_count).map(|i| i as f64 * step).collect(),
            };
            Ok(axis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_axis() {
        let axis = synthesize(20.0, 5, TimeMode::Elapsed).unwrap();
        assert_eq!(axis, vec![0.0, 5.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_single_scan() {
        assert_eq!(synthesize(12.0, 1, TimeMode::Elapsed).unwrap(), vec![0.0]);
        assert_eq!(scan_interval(12.0, 1), None);
    }

    #[test]
    fn test_scan_index_axis() {
        let axis = synthesize(f64::NAN, 4, TimeMode::ScanIndex).unwrap();
        assert_eq!(axis, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(synthesize(10.0, 0, TimeMode::Elapsed).is_err());
        assert!(synthesize(10.0, 0, TimeMode::ScanIndex).is_err());
        assert!(synthesize(-1.0, 3, TimeMode::Elapsed).is_err());
        assert!(synthesize(f64::INFINITY, 3, TimeMode::Elapsed).is_err());
    }

    #[test]
    fn test_last_scan_at_total_duration() {
        let axis = synthesize(21.7, 51, TimeMode::Elapsed).unwrap();
        assert_eq!(axis.len(), 51);
        assert!((axis[50] - 21.7).abs() < 1e-9);
    }
}
