//! # 色图
//!
//! 以若干锚点颜色线性插值近似常用 matplotlib 色图。
//!
//! ## 依赖关系
//! - 被 `xrd/plot.rs` 使用
//! - 使用 `plotters` 的 RGBColor

use clap::ValueEnum;
use plotters::style::RGBColor;

/// 可选色图
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Colormap {
    /// Cyclic dark-blue-white-red-dark (matplotlib twilight_shifted)
    #[default]
    #[value(name = "twilight_shifted", alias = "twilight-shifted")]
    TwilightShifted,
    /// Perceptually uniform blue-green-yellow
    Viridis,
    /// Perceptually uniform black-red-yellow
    Inferno,
    /// Black to white
    Gray,
}

impl Colormap {
    fn stops(&self) -> &'static [(f64, (u8, u8, u8))] {
        match self {
            Colormap::TwilightShifted => &[
                (0.00, (47, 20, 57)),
                (0.15, (84, 48, 139)),
                (0.30, (95, 125, 188)),
                (0.50, (226, 217, 226)),
                (0.70, (187, 103, 82)),
                (0.85, (126, 36, 73)),
                (1.00, (48, 20, 55)),
            ],
            Colormap::Viridis => &[
                (0.00, (68, 1, 84)),
                (0.25, (59, 82, 139)),
                (0.50, (33, 145, 140)),
                (0.75, (94, 201, 98)),
                (1.00, (253, 231, 37)),
            ],
            Colormap::Inferno => &[
                (0.00, (0, 0, 4)),
                (0.25, (87, 16, 110)),
                (0.50, (188, 55, 84)),
                (0.75, (249, 142, 9)),
                (1.00, (252, 255, 164)),
            ],
            Colormap::Gray => &[(0.00, (0, 0, 0)), (1.00, (255, 255, 255))],
        }
    }

    /// 位置 `t`（0..=1，超出范围截断）处的颜色
    pub fn color_at(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let stops = self.stops();

        let upper = stops
            .iter()
            .position(|(pos, _)| *pos >= t)
            .unwrap_or(stops.len() - 1);
        if upper == 0 {
            let (r, g, b) = stops[0].1;
            return RGBColor(r, g, b);
        }

        let (p0, c0) = stops[upper - 1];
        let (p1, c1) = stops[upper];
        let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
        RGBColor(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2))
    }

    /// 将强度映射为颜色：量化为 `levels` 个离散色阶，低于下限取最低色，
    /// 高于上限取最高色
    pub fn color_for(&self, value: f64, bounds: (f64, f64), levels: usize) -> RGBColor {
        let (lo, hi) = bounds;
        let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
        let steps = levels.max(2) - 1;
        let quantized = (t * steps as f64).floor().min(steps as f64) / steps as f64;
        self.color_at(quantized)
    }
}
