//! # 强度矩阵变换
//!
//! 三种可选变换，按固定顺序各施加至多一次：
//! 1. 2θ → Q 轴转换：`Q = |4π/λ · sin(2θ/2)|`（仅改写横轴）
//! 2. 归一化：每个扫描除以自身最大值
//! 3. 差分：每个扫描减去参考扫描
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs`, `commands/export.rs` 调用
//! - 使用 `models/scan.rs` 的 IntensityMatrix

use crate::error::{OperandoError, Result};
use crate::models::{AxisKind, IntensityMatrix, TransformOptions};

use log::{debug, warn};
use std::f64::consts::PI;

/// 2θ（度）→ Q（Å⁻¹）
pub fn two_theta_to_q(two_theta_deg: f64, wavelength: f64) -> f64 {
    ((4.0 * PI / wavelength) * (two_theta_deg.to_radians() / 2.0).sin()).abs()
}

/// 将横轴由 2θ 转换为 Q；强度不变
pub fn convert_axis_to_q(matrix: &mut IntensityMatrix, wavelength: f64) -> Result<()> {
    if !(wavelength.is_finite() && wavelength > 0.0) {
        return Err(OperandoError::ConfigurationError(format!(
            "wavelength must be positive, got {}",
            wavelength
        )));
    }
    if matrix.axis_kind() == AxisKind::Q {
        return Err(OperandoError::ConfigurationError(
            "axis is already in Q".to_string(),
        ));
    }

    let q: Vec<f64> = matrix
        .axis()
        .iter()
        .map(|&angle| two_theta_to_q(angle, wavelength))
        .collect();
    matrix.replace_axis(q, AxisKind::Q);
    Ok(())
}

/// 每列除以该列最大值
///
/// 最大值不为正的列保持不变。返回未归一化的列序号。
pub fn normalize(matrix: &mut IntensityMatrix) -> Result<Vec<usize>> {
    if matrix.is_normalized() {
        return Err(OperandoError::ConfigurationError(
            "matrix is already normalized".to_string(),
        ));
    }
    if matrix.differential_ref().is_some() {
        return Err(OperandoError::ConfigurationError(
            "normalization must be applied before the differential transform".to_string(),
        ));
    }

    let mut skipped = Vec::new();
    for (scan, mut column) in matrix.data_mut().columns_mut().into_iter().enumerate() {
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max > 0.0 {
            column.mapv_inplace(|v| v / max);
        } else {
            skipped.push(scan);
        }
    }

    if !skipped.is_empty() {
        warn!(
            "{} scan(s) have no positive intensity and were left unnormalized: {:?}",
            skipped.len(),
            skipped
        );
    }
    matrix.mark_normalized();
    Ok(skipped)
}

/// 每列减去参考列
pub fn differential(matrix: &mut IntensityMatrix, reference: usize) -> Result<()> {
    if matrix.differential_ref().is_some() {
        return Err(OperandoError::ConfigurationError(
            "differential transform already applied".to_string(),
        ));
    }
    if reference >= matrix.n_scans() {
        return Err(OperandoError::ConfigurationError(format!(
            "differential reference scan {} is out of range (0..{})",
            reference,
            matrix.n_scans()
        )));
    }

    let baseline = matrix.column(reference).to_owned();
    for mut column in matrix.data_mut().columns_mut() {
        column -= &baseline;
    }
    matrix.mark_differential(reference);
    Ok(())
}

/// 按固定顺序施加已启用的变换
pub fn apply(matrix: &mut IntensityMatrix, options: &TransformOptions) -> Result<()> {
    // 参考序号在入口处校验，避免先做完其余变换才失败
    if let Some(reference) = options.differential_ref {
        if reference >= matrix.n_scans() {
            return Err(OperandoError::ConfigurationError(format!(
                "differential reference scan {} is out of range (0..{})",
                reference,
                matrix.n_scans()
            )));
        }
    }

    if options.to_q {
        convert_axis_to_q(matrix, options.wavelength)?;
        debug!("converted axis to Q (λ = {:.5} Å)", options.wavelength);
    }
    if options.normalize {
        normalize(matrix)?;
        debug!("normalized {} scans", matrix.n_scans());
    }
    if let Some(reference) = options.differential_ref {
        differential(matrix, reference)?;
        debug!("subtracted reference scan {}", reference);
    }
    Ok(())
}
