//! # Biologic EC-Lab (.mpt) 解析器
//!
//! ## 格式说明
//! ```text
//! EC-Lab ASCII FILE
//! Nb header lines : 4
//! ...                                  # 其余元数据
//! mode	ox/red	...	time/s	...	Ewe/V	...   # 最后一行表头：列名
//! 1	0	...	12.5	...	3.012	...           # 制表符分隔的数据
//! ```
//!
//! 严格跳过 `Nb header lines` 声明的行数。最后一行表头若包含列名，则按名称取列；
//! 否则退回固定列号（GC: time=7, Ewe=11；CV: time=6, Ewe=8, I=9）。
//! 标记缺失或无法解析时跳过行数为 0，整个文件按数据处理。
//! 时间以秒存储，输出为小时。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/echem.rs`

use super::parse_field;
use crate::error::{OperandoError, Result};
use crate::models::{EchemLayout, EchemSeries, Technique};

use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;

/// 表头行数标记
pub const HEADER_MARKER: &str = "Nb header lines";

static HEADER_LINES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Nb header lines\s*:\s*(\d+)\s*$").expect("header marker regex is valid")
});

const FORMAT: &str = "biologic";
const SECONDS_PER_HOUR: f64 = 3600.0;

const TIME_NAMES: &[&str] = &["time/s"];
const VOLTAGE_NAMES: &[&str] = &["Ewe/V", "<Ewe>/V"];
const CURRENT_NAMES: &[&str] = &["<I>/mA", "I/mA"];

/// 数据列位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub time: usize,
    /// GC 为电压列，CV 为电流列
    pub signal: usize,
    /// CV 的电压列
    pub companion: Option<usize>,
}

impl ColumnMap {
    /// 无列名时使用的固定列号
    pub fn fixed(technique: Technique) -> Self {
        match technique {
            Technique::Gc => ColumnMap {
                time: 7,
                signal: 11,
                companion: None,
            },
            Technique::Cv => ColumnMap {
                time: 6,
                signal: 9,
                companion: Some(8),
            },
        }
    }

    /// 从列名行构造；不含 `time/s` 时视为没有列名行，返回 `Ok(None)`
    pub fn from_header(header: &str, technique: Technique, path: &str) -> Result<Option<Self>> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |candidates: &[&str]| names.iter().position(|n| candidates.contains(n));

        let Some(time) = find(TIME_NAMES) else {
            return Ok(None);
        };

        let require = |candidates: &[&str]| {
            find(candidates).ok_or_else(|| {
                OperandoError::parse(
                    FORMAT,
                    path,
                    format!("column '{}' not found in header row", candidates[0]),
                )
            })
        };

        let map = match technique {
            Technique::Gc => ColumnMap {
                time,
                signal: require(VOLTAGE_NAMES)?,
                companion: None,
            },
            Technique::Cv => ColumnMap {
                time,
                signal: require(CURRENT_NAMES)?,
                companion: Some(require(VOLTAGE_NAMES)?),
            },
        };
        Ok(Some(map))
    }

    /// 每条记录至少需要的字段数
    pub fn min_fields(&self) -> usize {
        self.time.max(self.signal).max(self.companion.unwrap_or(0)) + 1
    }
}

/// 读取 "Nb header lines : N" 声明的表头行数
pub fn header_line_count(lines: &[&str]) -> Option<usize> {
    let line = lines.iter().find(|l| l.contains(HEADER_MARKER))?;
    HEADER_LINES_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 解析 Biologic 文本内容
pub fn parse_biologic_content(
    content: &str,
    technique: Technique,
    path: &str,
) -> Result<EchemSeries> {
    let lines: Vec<&str> = content.lines().collect();

    let skip = match header_line_count(&lines) {
        Some(n) => n,
        None => {
            warn!(
                "{}: no valid '{}' marker, parsing the whole file as data",
                path, HEADER_MARKER
            );
            0
        }
    };

    if skip > lines.len() {
        return Err(OperandoError::parse(
            FORMAT,
            path,
            format!(
                "header declares {} lines but the file has only {}",
                skip,
                lines.len()
            ),
        ));
    }

    let columns = match skip {
        0 => None,
        n => ColumnMap::from_header(lines[n - 1], technique, path)?,
    };
    let columns = columns.unwrap_or_else(|| {
        debug!("{}: no column-name row, using fixed column offsets", path);
        ColumnMap::fixed(technique)
    });
    let min_fields = columns.min_fields();

    let mut time = Vec::new();
    let mut signal = Vec::new();
    let mut companion = columns.companion.map(|_| Vec::new());

    for (offset, line) in lines[skip..].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = skip + offset + 1;
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < min_fields {
            return Err(OperandoError::parse(
                FORMAT,
                path,
                format!(
                    "line {}: expected at least {} tab-separated fields, found {}",
                    line_no,
                    min_fields,
                    fields.len()
                ),
            ));
        }

        let seconds = parse_field(fields[columns.time], "time", line_no, FORMAT, path)?;
        time.push(seconds / SECONDS_PER_HOUR);
        signal.push(parse_field(
            fields[columns.signal],
            signal_name(technique),
            line_no,
            FORMAT,
            path,
        )?);
        if let (Some(idx), Some(values)) = (columns.companion, companion.as_mut()) {
            values.push(parse_field(fields[idx], "voltage", line_no, FORMAT, path)?);
        }
    }

    Ok(EchemSeries::new(
        technique,
        EchemLayout::Biologic,
        time,
        signal,
        companion,
    ))
}

fn signal_name(technique: Technique) -> &'static str {
    match technique {
        Technique::Gc => "voltage",
        Technique::Cv => "current",
    }
}
