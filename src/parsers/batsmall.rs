//! # BatSmall 解析器
//!
//! 无表头，每行两个制表符分隔字段：时间、电压。时间单位保持原样，不做换算。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/echem.rs`

use super::parse_field;
use crate::error::{OperandoError, Result};
use crate::models::{EchemLayout, EchemSeries, Technique};

const FORMAT: &str = "batsmall";

/// 解析 BatSmall 文本内容
pub fn parse_batsmall_content(content: &str, path: &str) -> Result<EchemSeries> {
    let mut time = Vec::new();
    let mut voltage = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(OperandoError::parse(
                FORMAT,
                path,
                format!("line {}: expected 2 tab-separated fields (time, voltage)", line_no),
            ));
        }
        time.push(parse_field(fields[0], "time", line_no, FORMAT, path)?);
        voltage.push(parse_field(fields[1], "voltage", line_no, FORMAT, path)?);
    }

    Ok(EchemSeries::new(
        Technique::Gc,
        EchemLayout::BatSmall,
        time,
        voltage,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batsmall() {
        let content = "0\t2.95\n0.5\t3.10\n1.0\t3.42\n";
        let series = parse_batsmall_content(content, "gc.txt").unwrap();
        assert_eq!(series.time(), &[0.0, 0.5, 1.0]);
        assert_eq!(series.signal(), &[2.95, 3.10, 3.42]);
        assert_eq!(series.layout(), EchemLayout::BatSmall);
    }

    #[test]
    fn test_time_not_converted() {
        let content = "3600\t3.0\r\n7200\t3.1\r\n";
        let series = parse_batsmall_content(content, "gc.txt").unwrap();
        assert_eq!(series.duration(), Some(7200.0));
    }

    #[test]
    fn test_space_separated_rejected() {
        let err = parse_batsmall_content("0 2.95\n", "gc.txt").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_malformed_voltage() {
        let err = parse_batsmall_content("0\t2.95\n1\tn/a\n", "gc.txt").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
