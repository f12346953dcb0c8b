//! 文件扫描服务
//!
//! 负责扫描目录、过滤图片文件

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::utils::error::{AppError, AppResult};

/// 支持的图片格式
pub const SUPPORTED_FORMATS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif", "heic", "heif", "raw", "cr2",
    "cr3", "nef", "arw", "dng",
];

/// 判断路径是否为支持的图片
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_FORMATS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// 扫描结果
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// 找到的图片文件路径列表
    pub files: Vec<PathBuf>,
    /// 扫描的目录数
    pub dirs_scanned: usize,
    /// 跳过的文件数
    pub files_skipped: usize,
}

/// 扫描选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// 是否递归扫描子目录
    pub recursive: bool,
    /// 排除的目录名
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            exclude_dirs: vec![
                ".git".to_string(),
                "$RECYCLE.BIN".to_string(),
                "System Volume Information".to_string(),
            ],
        }
    }
}

/// 文件扫描器
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// 扫描单个目录
    pub fn scan_directory(&self, path: &Path) -> AppResult<ScanResult> {
        if !path.is_dir() {
            return Err(AppError::InvalidPath(format!(
                "目录不存在: {}",
                path.display()
            )));
        }

        let mut walker = WalkDir::new(path).sort_by_file_name();
        if !self.options.recursive {
            walker = walker.max_depth(1);
        }

        let mut result = ScanResult::default();

        let entries = walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_excluded(e));

        for entry in entries {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => result.dirs_scanned += 1,
                Ok(entry) if is_image_file(entry.path()) => result.files.push(entry.into_path()),
                Ok(_) => result.files_skipped += 1,
                Err(e) => {
                    tracing::warn!("扫描错误: {}", e);
                    result.files_skipped += 1;
                }
            }
        }

        tracing::info!(
            "扫描完成: {} 个目录, {} 个图片文件, {} 个跳过",
            result.dirs_scanned,
            result.files.len(),
            result.files_skipped
        );

        Ok(result)
    }

    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        entry.file_type().is_dir()
            && self
                .options
                .exclude_dirs
                .iter()
                .any(|name| entry.file_name().to_string_lossy() == name.as_str())
    }
}
