//! # 数据模型模块
//!
//! 定义 XRD 扫描、强度矩阵、电化学序列和运行配置。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`xrd/` 和 `commands/` 使用
//! - 子模块: scan, echem, config

pub mod config;
pub mod echem;
pub mod scan;

pub use config::{EchemSource, PlotOptions, RunConfig, ScanSource, TransformOptions};
pub use echem::{EchemFormat, EchemLayout, EchemSeries, Technique};
pub use scan::{AxisKind, IntensityMatrix, ScanFile};
