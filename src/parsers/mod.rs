//! # 解析器模块
//!
//! 提供电化学记录（Biologic / BatSmall / BATX）和 XRD 扫描文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `xrd/builder.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: biologic, batsmall, batx, scan

pub mod batsmall;
pub mod batx;
pub mod biologic;
pub mod scan;

use crate::error::{OperandoError, Result};
use crate::models::{EchemFormat, EchemLayout, EchemSeries, Technique};

use log::debug;
use std::fs;
use std::path::Path;

/// 读取整个文本文件
///
/// EC-Lab 导出为 Windows-1252 编码，非 UTF-8 字节（如列名中的 `µ`）替换为
/// U+FFFD；数值字段均为 ASCII，不受影响。
pub(crate) fn read_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(OperandoError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let bytes = fs::read(path).map_err(|e| OperandoError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!("{} is not valid UTF-8, decoding lossily", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// 解析浮点数字段，失败时给出行号
pub(crate) fn parse_field(
    value: &str,
    column: &str,
    line_no: usize,
    format: &str,
    path: &str,
) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        OperandoError::parse(
            format,
            path,
            format!(
                "line {}: cannot parse {} value '{}' as a number",
                line_no,
                column,
                value.trim()
            ),
        )
    })
}

/// 按文件扩展名识别 GC 记录布局
///
/// 与后缀逐字比较：`.mpt` 为 Biologic，`.txt` 为 BatSmall，其余一律拒绝。
pub fn detect_gc_layout(path: &Path) -> Result<EchemLayout> {
    let name = path.to_string_lossy();
    if name.ends_with(".mpt") {
        Ok(EchemLayout::Biologic)
    } else if name.ends_with(".txt") {
        Ok(EchemLayout::BatSmall)
    } else {
        Err(OperandoError::UnsupportedFormat(format!(
            "GC file '{}' is neither Biologic (.mpt) nor BatSmall (.txt); \
             use --echem-format to select a layout explicitly",
            path.display()
        )))
    }
}

/// 确定实际使用的布局
pub fn resolve_layout(path: &Path, technique: Technique, format: EchemFormat) -> Result<EchemLayout> {
    match (technique, format) {
        (Technique::Gc, EchemFormat::Auto) => detect_gc_layout(path),
        (_, EchemFormat::Biologic) | (Technique::Cv, EchemFormat::Auto) => {
            Ok(EchemLayout::Biologic)
        }
        (Technique::Gc, EchemFormat::Batsmall) => Ok(EchemLayout::BatSmall),
        (Technique::Gc, EchemFormat::Batx) => Ok(EchemLayout::Batx),
        (Technique::Cv, other) => Err(OperandoError::ConfigurationError(format!(
            "CV data requires the Biologic layout (current column); {:?} carries voltage only",
            other
        ))),
    }
}

/// 解析电化学记录文件
pub fn parse_echem_file(
    path: &Path,
    technique: Technique,
    format: EchemFormat,
) -> Result<EchemSeries> {
    let layout = resolve_layout(path, technique, format)?;
    debug!("{} log {} uses the {} layout", technique, path.display(), layout);

    let content = read_text(path)?;
    let name = path.display().to_string();

    let series = match layout {
        EchemLayout::Biologic => biologic::parse_biologic_content(&content, technique, &name)?,
        EchemLayout::BatSmall => batsmall::parse_batsmall_content(&content, &name)?,
        EchemLayout::Batx => batx::parse_batx_content(&content, &name)?,
    };

    if series.is_empty() {
        return Err(OperandoError::parse(
            &layout.to_string(),
            &name,
            "no data records found",
        ));
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_gc_layout() {
        assert_eq!(
            detect_gc_layout(Path::new("GC/GC-ILE.mpt")).unwrap(),
            EchemLayout::Biologic
        );
        assert_eq!(
            detect_gc_layout(Path::new("cell_7.txt")).unwrap(),
            EchemLayout::BatSmall
        );
        assert!(matches!(
            detect_gc_layout(Path::new("cell_7.csv")),
            Err(OperandoError::UnsupportedFormat(_))
        ));
        assert!(detect_gc_layout(Path::new("cell_7.MPT")).is_err());
    }

    #[test]
    fn test_resolve_layout() {
        let p = PathBuf::from("log.csv");
        assert_eq!(
            resolve_layout(&p, Technique::Gc, EchemFormat::Batx).unwrap(),
            EchemLayout::Batx
        );
        assert_eq!(
            resolve_layout(&p, Technique::Cv, EchemFormat::Auto).unwrap(),
            EchemLayout::Biologic
        );
        assert!(matches!(
            resolve_layout(&p, Technique::Cv, EchemFormat::Batsmall),
            Err(OperandoError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_parse_echem_file_missing() {
        let err = parse_echem_file(
            Path::new("/definitely/not/here.mpt"),
            Technique::Gc,
            EchemFormat::Auto,
        )
        .unwrap_err();
        assert!(matches!(err, OperandoError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_echem_file_batsmall() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gc.txt");
        std::fs::write(&path, "0\t3.0\n1.5\t3.2\n").unwrap();

        let series = parse_echem_file(&path, Technique::Gc, EchemFormat::Auto).unwrap();
        assert_eq!(series.layout(), EchemLayout::BatSmall);
        assert_eq!(series.duration(), Some(1.5));
    }

    #[test]
    fn test_parse_echem_file_windows_1252_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GC-ILE.mpt");
        let mut content = b"EC-Lab ASCII FILE\nNb header lines : 3\n".to_vec();
        content.extend_from_slice(b"time/s\tEwe/V\tCapacitance charge/\xB5F\n");
        content.extend_from_slice(b"0\t3.10\t0\n3600\t3.25\t0\n");
        std::fs::write(&path, content).unwrap();

        let series = parse_echem_file(&path, Technique::Gc, EchemFormat::Auto).unwrap();
        assert_eq!(series.layout(), EchemLayout::Biologic);
        assert_eq!(series.time(), &[0.0, 1.0]);
        assert_eq!(series.signal(), &[3.10, 3.25]);
    }

    #[test]
    fn test_read_text_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"I/\xB5A\n1.0\n").unwrap();

        let text = read_text(&path).unwrap();
        assert!(text.starts_with("I/\u{FFFD}A"));
        assert!(text.ends_with("1.0\n"));
    }

    #[test]
    fn test_parse_echem_file_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gc.txt");
        std::fs::write(&path, "\n\n").unwrap();

        let err = parse_echem_file(&path, Technique::Gc, EchemFormat::Auto).unwrap_err();
        assert!(matches!(err, OperandoError::ParseError { .. }));
    }
}
