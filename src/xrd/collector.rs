//! # 扫描文件收集器
//!
//! 在 XRD 数据目录中收集指定扩展名的扫描文件，按自然顺序排序并截断。
//!
//! ## 功能
//! - glob 模式匹配 (`*.<ext>`)
//! - 自然排序（`scan2` 先于 `scan10`）
//! - 最大文件数限制
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `walkdir` 遍历目录, `glob` 匹配文件名

use super::natural::sort_naturally;
use crate::error::{OperandoError, Result};
use crate::models::ScanSource;

use log::debug;
use std::path::PathBuf;
use walkdir::WalkDir;

/// 扫描文件收集器
pub struct ScanCollector {
    /// 数据目录
    dir: PathBuf,
    /// 文件扩展名（不含点）
    extension: String,
    /// 最多收集的文件数
    limit: Option<usize>,
}

impl ScanCollector {
    /// 创建新的收集器（默认扩展名 `xy`）
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            extension: "xy".to_string(),
            limit: None,
        }
    }

    /// 由运行配置构造
    pub fn from_source(source: &ScanSource) -> Self {
        Self::new(source.dir.clone())
            .with_extension(&source.extension)
            .limit(source.max_files)
    }

    /// 设置扩展名
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// 设置最大文件数
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// 文件名匹配模式
    pub fn pattern(&self) -> String {
        format!("*.{}", glob::Pattern::escape(&self.extension))
    }

    /// 收集、排序并截断扫描文件列表
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(OperandoError::DirectoryNotFound {
                path: self.dir.display().to_string(),
            });
        }
        if self.limit == Some(0) {
            return Err(OperandoError::ConfigurationError(
                "maximum scan count must be at least 1".to_string(),
            ));
        }

        let pattern = self.pattern();
        let glob_pattern = glob::Pattern::new(&pattern).map_err(|e| {
            OperandoError::ConfigurationError(format!("Invalid pattern '{}': {}", pattern, e))
        })?;

        let mut files: Vec<PathBuf> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|name| glob_pattern.matches(name))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        if files.is_empty() {
            return Err(OperandoError::NoFilesFound {
                pattern: self.dir.join(&pattern).display().to_string(),
            });
        }

        sort_naturally(&mut files);

        if let Some(limit) = self.limit {
            if files.len() > limit {
                debug!("keeping the first {} of {} scan files", limit, files.len());
                files.truncate(limit);
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &std::path::Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "10 1\n").unwrap();
        }
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_collect_natural_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["scan10.xy", "scan1.xy", "scan2.xy", "notes.txt", "scan3.xye"]);

        let files = ScanCollector::new(dir.path().to_path_buf()).collect().unwrap();
        assert_eq!(names(&files), vec!["scan1.xy", "scan2.xy", "scan10.xy"]);
    }

    #[test]
    fn test_collect_extension_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["s_3.xye", "s_1.xye", "s_20.xye", "s_2.xy"]);

        let files = ScanCollector::new(dir.path().to_path_buf())
            .with_extension(".xye")
            .limit(Some(2))
            .collect()
            .unwrap();
        assert_eq!(names(&files), vec!["s_1.xye", "s_3.xye"]);
    }

    #[test]
    fn test_collect_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Figures")).unwrap();
        touch(&dir.path().join("Figures"), &["old.xy"]);
        touch(dir.path(), &["a1.xy"]);

        let files = ScanCollector::new(dir.path().to_path_buf()).collect().unwrap();
        assert_eq!(names(&files), vec!["a1.xy"]);
    }

    #[test]
    fn test_collect_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScanCollector::new(dir.path().to_path_buf()).collect().unwrap_err();
        assert!(matches!(err, OperandoError::NoFilesFound { .. }));

        let err = ScanCollector::new(dir.path().join("missing")).collect().unwrap_err();
        assert!(matches!(err, OperandoError::DirectoryNotFound { .. }));

        touch(dir.path(), &["a1.xy"]);
        let err = ScanCollector::new(dir.path().to_path_buf())
            .limit(Some(0))
            .collect()
            .unwrap_err();
        assert!(matches!(err, OperandoError::ConfigurationError(_)));
    }
}
