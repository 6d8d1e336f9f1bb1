//! # XRD 扫描文件解析器
//!
//! 空白分隔的列文本（`.xy`, `.xye`, `.dat` 等）：第一列为 2θ，第二列为强度，
//! 其余列（如 `.xye` 的误差列）忽略。以 `#`、`!` 或 `'` 开头的行视为注释；
//! 首个数据行之前允许一行非数值列名行（如 `2theta intensity`）。
//!
//! ## 依赖关系
//! - 被 `xrd/builder.rs` 使用
//! - 使用 `models/scan.rs`

use super::{parse_field, read_text};
use crate::error::{OperandoError, Result};
use crate::models::ScanFile;

use log::debug;
use std::path::Path;

const FORMAT: &str = "xrd scan";
const COMMENT_PREFIXES: &[char] = &['#', '!', '\''];

/// 读取单个扫描文件
pub fn load_scan_file(path: &Path, index: usize) -> Result<ScanFile> {
    let content = read_text(path)?;
    let points = parse_scan_content(&content, &path.display().to_string())?;
    Ok(ScanFile::new(index, path.to_path_buf(), points))
}

/// 解析扫描文本为 (角度, 强度) 点对
pub fn parse_scan_content(content: &str, path: &str) -> Result<Vec<(f64, f64)>> {
    let mut points = Vec::new();
    let mut header_seen = false;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIXES) {
            continue;
        }
        let line_no = idx + 1;

        if points.is_empty() && !header_seen && !starts_with_number(trimmed) {
            debug!("{}: line {} treated as column names", path, line_no);
            header_seen = true;
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(angle), Some(intensity)) = (fields.next(), fields.next()) else {
            return Err(OperandoError::parse(
                FORMAT,
                path,
                format!("line {}: expected two columns (angle, intensity)", line_no),
            ));
        };
        points.push((
            parse_field(angle, "angle", line_no, FORMAT, path)?,
            parse_field(intensity, "intensity", line_no, FORMAT, path)?,
        ));
    }

    if points.is_empty() {
        return Err(OperandoError::parse(FORMAT, path, "no data points found"));
    }

    Ok(points)
}

fn starts_with_number(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|field| field.parse::<f64>().is_ok())
}
