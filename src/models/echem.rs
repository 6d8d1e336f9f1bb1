//! # 电化学数据模型
//!
//! 存储从电化学记录文件中提取的时间序列（GC 电压或 CV 电流）。
//!
//! ## 依赖关系
//! - 被 `parsers/biologic.rs`, `parsers/batsmall.rs`, `parsers/batx.rs` 构造
//! - 被 `commands/` 和 `xrd/plot.rs` 使用

use clap::ValueEnum;

/// 电化学测试技术
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Technique {
    /// Galvanostatic cycling (voltage vs. time)
    #[default]
    Gc,
    /// Cyclic voltammetry (current vs. time)
    Cv,
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technique::Gc => write!(f, "GC"),
            Technique::Cv => write!(f, "CV"),
        }
    }
}

/// 电化学记录文件布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchemLayout {
    /// EC-Lab `.mpt`：带 "Nb header lines" 的制表符分隔文件
    Biologic,
    /// 无表头的两列制表符分隔文件
    BatSmall,
    /// 分号分隔，3 行前导 + 列名 `[s]` / `[V]`
    Batx,
}

impl std::fmt::Display for EchemLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EchemLayout::Biologic => write!(f, "Biologic"),
            EchemLayout::BatSmall => write!(f, "BatSmall"),
            EchemLayout::Batx => write!(f, "BATX"),
        }
    }
}

/// 用户选择的文件布局（`auto` 按扩展名识别）
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum EchemFormat {
    /// Detect from file extension (.mpt = Biologic, .txt = BatSmall)
    #[default]
    Auto,
    /// Biologic EC-Lab export
    Biologic,
    /// BatSmall two-column export
    Batsmall,
    /// BATX semicolon-separated export
    Batx,
}

/// 电化学时间序列
///
/// 构造后不可变。GC 的 `signal` 是电压 (V)，CV 的 `signal` 是电流 (mA)，
/// CV 另带电压伴随序列。
#[derive(Debug, Clone)]
pub struct EchemSeries {
    technique: Technique,
    layout: EchemLayout,
    time: Vec<f64>,
    signal: Vec<f64>,
    companion: Option<Vec<f64>>,
}

impl EchemSeries {
    pub fn new(
        technique: Technique,
        layout: EchemLayout,
        time: Vec<f64>,
        signal: Vec<f64>,
        companion: Option<Vec<f64>>,
    ) -> Self {
        debug_assert_eq!(time.len(), signal.len());
        debug_assert!(companion.as_ref().map_or(true, |c| c.len() == time.len()));
        EchemSeries {
            technique,
            layout,
            time,
            signal,
            companion,
        }
    }

    pub fn technique(&self) -> Technique {
        self.technique
    }

    pub fn layout(&self) -> EchemLayout {
        self.layout
    }

    /// 时间序列（Biologic/BATX 为小时，BatSmall 保持原始单位）
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn signal(&self) -> &[f64] {
        &self.signal
    }

    pub fn companion(&self) -> Option<&[f64]> {
        self.companion.as_deref()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// 总时长：最后一个时间点
    pub fn duration(&self) -> Option<f64> {
        self.time.last().copied()
    }

    /// 信号最小值与最大值
    pub fn signal_range(&self) -> Option<(f64, f64)> {
        if self.signal.is_empty() {
            return None;
        }
        let min = self.signal.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// (time, signal) 点对
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.signal.iter().copied())
    }

    /// 信号轴名称
    pub fn signal_label(&self, ion: &str) -> String {
        match self.technique {
            Technique::Gc => format!("Potential vs {ion}/{ion}+ (V)"),
            Technique::Cv => "Current (mA)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_and_range() {
        let series = EchemSeries::new(
            Technique::Gc,
            EchemLayout::BatSmall,
            vec![0.0, 1.0, 2.5],
            vec![3.1, 2.2, 3.8],
            None,
        );
        assert_eq!(series.duration(), Some(2.5));
        assert_eq!(series.signal_range(), Some((2.2, 3.8)));
        assert_eq!(series.points().count(), 3);
    }

    #[test]
    fn test_signal_label() {
        let gc = EchemSeries::new(Technique::Gc, EchemLayout::Biologic, vec![], vec![], None);
        assert_eq!(gc.signal_label("Na"), "Potential vs Na/Na+ (V)");
        assert!(gc.is_empty());
        assert_eq!(gc.duration(), None);

        let cv = EchemSeries::new(
            Technique::Cv,
            EchemLayout::Biologic,
            vec![0.0],
            vec![0.1],
            Some(vec![2.0]),
        );
        assert_eq!(cv.signal_label("Li"), "Current (mA)");
        assert_eq!(cv.companion(), Some(&[2.0][..]));
    }
}
