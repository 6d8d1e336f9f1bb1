//! # 原位 XRD 处理模块
//!
//! 从扫描目录到最终图像的全部处理步骤。
//!
//! ## 子模块
//! - `natural`: 文件名自然排序
//! - `collector`: 扫描文件收集
//! - `builder`: 强度矩阵构建与格点校验
//! - `transform`: Q 轴转换、归一化、差分
//! - `timeaxis`: 扫描时间轴合成
//! - `colormap`: 色图
//! - `plot`: 联合图绘制
//! - `export`: CSV 导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/`, `parsers/`

pub mod builder;
pub mod collector;
pub mod colormap;
pub mod export;
pub mod natural;
pub mod plot;
pub mod timeaxis;
pub mod transform;

pub use collector::ScanCollector;
pub use timeaxis::TimeMode;
