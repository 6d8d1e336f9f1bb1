//! # echem 子命令实现
//!
//! 解析电化学记录，打印摘要表与首尾数据预览，可选导出 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/echem.rs` 定义的 EchemCommandArgs
//! - 使用 `parsers/` 读取记录
//! - 使用 `xrd/export.rs` 导出

use crate::cli::echem::EchemCommandArgs;
use crate::error::Result;
use crate::models::{EchemSeries, Technique};
use crate::parsers;
use crate::utils::output;
use crate::xrd::export;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Voltage (V)")]
    companion: String,
}

/// 执行电化学记录解析
pub fn execute(args: EchemCommandArgs) -> Result<()> {
    output::print_header("Electrochemistry Log Summary");

    let series = parsers::parse_echem_file(&args.input, args.technique, args.echem_format)?;
    print_summary(&args, &series);

    let rows = preview_rows(&series, args.preview);
    if !rows.is_empty() {
        output::print_separator();
        println!("{}", Table::new(&rows));
    }

    if let Some(ref path) = args.output {
        export::echem_to_csv(&series, path)?;
        output::print_success(&format!("Series saved to '{}'", path.display()));
    }

    Ok(())
}

fn print_summary(args: &EchemCommandArgs, series: &EchemSeries) {
    output::print_field("File", &args.input.display().to_string());
    output::print_field("Technique", &series.technique().to_string());
    output::print_field("Layout", &series.layout().to_string());
    output::print_field("Points", &series.len().to_string());
    if let Some(duration) = series.duration() {
        output::print_field("Duration", &format!("{:.4}", duration));
    }
    if let Some((min, max)) = series.signal_range() {
        let unit = match series.technique() {
            Technique::Gc => "V",
            Technique::Cv => "mA",
        };
        output::print_field("Signal range", &format!("{:.4} .. {:.4} {}", min, max, unit));
    }
}

/// 首尾各 `count` 行；总行数不超过 2·count 时全部列出
fn preview_rows(series: &EchemSeries, count: usize) -> Vec<PreviewRow> {
    let n = series.len();
    let indices: Vec<usize> = if n <= 2 * count {
        (0..n).collect()
    } else {
        (0..count).chain(n - count..n).collect()
    };

    indices
        .into_iter()
        .map(|i| PreviewRow {
            index: i,
            time: format!("{:.5}", series.time()[i]),
            signal: format!("{:.5}", series.signal()[i]),
            companion: series
                .companion()
                .map(|c| format!("{:.5}", c[i]))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EchemLayout;

    fn series(n: usize) -> EchemSeries {
        let time: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let signal = time.iter().map(|t| 2.0 + t / 100.0).collect();
        EchemSeries::new(Technique::Gc, EchemLayout::BatSmall, time, signal, None)
    }

    #[test]
    fn test_preview_head_and_tail() {
        let rows = preview_rows(&series(20), 3);
        let idx: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(idx, vec![0, 1, 2, 17, 18, 19]);
        assert_eq!(rows[0].companion, "-");
    }

    #[test]
    fn test_preview_short_series() {
        assert_eq!(preview_rows(&series(4), 3).len(), 4);
        assert!(preview_rows(&series(10), 0).is_empty());
    }
}
