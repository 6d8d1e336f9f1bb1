//! # 自然排序
//!
//! 按"人类习惯"比较文件名：嵌入的数字按数值比较，其余文本按字典序比较，
//! 使 `scan2` 排在 `scan10` 之前。扫描文件的自然顺序即时间顺序。
//!
//! ## 依赖关系
//! - 被 `xrd/collector.rs` 使用
//! - 使用 `regex` 切分数字/非数字片段

use regex::Regex;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static CHUNK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+|\D+").expect("natural sort regex is valid"));

/// 自然顺序比较两个字符串
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = CHUNK_RE.find_iter(a).map(|m| m.as_str());
    let mut right = CHUNK_RE.find_iter(b).map(|m| m.as_str());

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_chunks(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_chunks(x: &str, y: &str) -> Ordering {
    let x_digit = x.starts_with(|c: char| c.is_ascii_digit());
    let y_digit = y.starts_with(|c: char| c.is_ascii_digit());
    match (x_digit, y_digit) {
        (true, true) => {
            // 去掉前导零后先比长度再比字典序，避免大整数溢出
            let xs = x.trim_start_matches('0');
            let ys = y.trim_start_matches('0');
            xs.len().cmp(&ys.len()).then_with(|| xs.cmp(ys))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.cmp(y),
    }
}

fn file_name_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 按文件名自然排序
pub fn sort_naturally(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&file_name_key(a), &file_name_key(b)));
}
