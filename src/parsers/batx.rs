//! # BATX 解析器
//!
//! 分号分隔的 CSV：前 3 行为仪器信息，第 4 行为列名。
//! 只读取名为 `[s]`（时间，秒）和 `[V]`（电压）的两列，时间换算为小时。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `csv` + `serde` 按列名反序列化

use crate::error::{OperandoError, Result};
use crate::models::{EchemLayout, EchemSeries, Technique};

use serde::Deserialize;

const FORMAT: &str = "batx";
const PREAMBLE_ROWS: usize = 3;
const TIME_COLUMN: &str = "[s]";
const VOLTAGE_COLUMN: &str = "[V]";

#[derive(Debug, Deserialize)]
struct BatxRecord {
    #[serde(rename = "[s]")]
    seconds: f64,
    #[serde(rename = "[V]")]
    volts: f64,
}

/// 解析 BATX 文本内容
pub fn parse_batx_content(content: &str, path: &str) -> Result<EchemSeries> {
    let body = content.splitn(PREAMBLE_ROWS + 1, '\n').nth(PREAMBLE_ROWS).ok_or_else(|| {
        OperandoError::parse(
            FORMAT,
            path,
            format!("expected {} preamble rows followed by a header row", PREAMBLE_ROWS),
        )
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| OperandoError::parse(FORMAT, path, e.to_string()))?;
    for column in [TIME_COLUMN, VOLTAGE_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(OperandoError::parse(
                FORMAT,
                path,
                format!("column '{}' not found in header row", column),
            ));
        }
    }

    let mut time = Vec::new();
    let mut voltage = Vec::new();
    for record in rdr.deserialize::<BatxRecord>() {
        let record = record.map_err(|e| OperandoError::parse(FORMAT, path, e.to_string()))?;
        time.push(record.seconds / 3600.0);
        voltage.push(record.volts);
    }

    Ok(EchemSeries::new(
        Technique::Gc,
        EchemLayout::Batx,
        time,
        voltage,
        None,
    ))
}
