//! # XRD 扫描与强度矩阵数据模型
//!
//! - `ScanFile`: 单个 XRD 扫描（角度/强度点对）
//! - `IntensityMatrix`: [角度, 扫描序号] 二维强度矩阵
//!
//! ## 依赖关系
//! - 被 `parsers/scan.rs` 和 `xrd/` 使用
//! - 使用 `ndarray` 存储矩阵

use ndarray::{Array2, ArrayView1};
use std::path::PathBuf;

/// 横轴类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// 衍射角 2θ（度）
    TwoTheta,
    /// 动量转移 Q（Å⁻¹）
    Q,
}

impl AxisKind {
    /// 图表横轴名称
    pub fn label(&self) -> &'static str {
        match self {
            AxisKind::TwoTheta => "2θ (°)",
            AxisKind::Q => "Q (Å⁻¹)",
        }
    }

    /// CSV 列名
    pub fn column_name(&self) -> &'static str {
        match self {
            AxisKind::TwoTheta => "2theta",
            AxisKind::Q => "q",
        }
    }
}

/// 单个 XRD 扫描
#[derive(Debug, Clone)]
pub struct ScanFile {
    /// 自然排序后的序号（从 0 开始）
    pub index: usize,
    /// 来源文件
    pub path: PathBuf,
    /// (角度, 强度) 点对，按角度升序
    pub points: Vec<(f64, f64)>,
}

impl ScanFile {
    pub fn new(index: usize, path: PathBuf, mut points: Vec<(f64, f64)>) -> Self {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        ScanFile {
            index,
            path,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(a, _)| *a)
    }

    /// 文件名（用于日志和错误信息）
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// 强度矩阵
///
/// 行对应角度（或 Q）格点，列对应扫描。每种变换最多施加一次，
/// 顺序固定：Q 转换 → 归一化 → 差分。
#[derive(Debug, Clone)]
pub struct IntensityMatrix {
    axis: Vec<f64>,
    axis_kind: AxisKind,
    data: Array2<f64>,
    normalized: bool,
    differential_ref: Option<usize>,
}

impl IntensityMatrix {
    /// 由 2θ 轴和 [角度, 扫描] 数据构造
    ///
    /// 调用方保证 `data.nrows() == axis.len()`。
    pub fn new(axis: Vec<f64>, data: Array2<f64>) -> Self {
        debug_assert_eq!(axis.len(), data.nrows());
        IntensityMatrix {
            axis,
            axis_kind: AxisKind::TwoTheta,
            data,
            normalized: false,
            differential_ref: None,
        }
    }

    pub fn axis(&self) -> &[f64] {
        &self.axis
    }

    pub fn axis_kind(&self) -> AxisKind {
        self.axis_kind
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// 角度格点数
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// 扫描数
    pub fn n_scans(&self) -> usize {
        self.data.ncols()
    }

    pub fn column(&self, scan: usize) -> ArrayView1<'_, f64> {
        self.data.column(scan)
    }

    pub fn value(&self, row: usize, scan: usize) -> f64 {
        self.data[[row, scan]]
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn differential_ref(&self) -> Option<usize> {
        self.differential_ref
    }

    /// 横轴范围 (min, max)
    pub fn axis_range(&self) -> Option<(f64, f64)> {
        let min = self.axis.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.axis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// 全部强度的 (min, max)
    pub fn intensity_range(&self) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        let min = self.data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    pub(crate) fn replace_axis(&mut self, axis: Vec<f64>, kind: AxisKind) {
        debug_assert_eq!(axis.len(), self.axis.len());
        self.axis = axis;
        self.axis_kind = kind;
    }

    pub(crate) fn data_mut(&mut self) -> &mut Array2<f64> {
        &mut self.data
    }

    pub(crate) fn mark_normalized(&mut self) {
        self.normalized = true;
    }

    pub(crate) fn mark_differential(&mut self, reference: usize) {
        self.differential_ref = Some(reference);
    }
}
