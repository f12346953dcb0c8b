//! 导入服务
//!
//! 扫描目录，读取文件信息并计算哈希，然后写入存储

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::db::FileStore;
use crate::models::NewFile;
use crate::utils::error::{AppError, AppResult};

use super::device_entry::DeviceEntry;
use super::hasher::FileHasher;
use super::scanner::{ScanOptions, Scanner};

/// 导入选项
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// 扫描选项
    pub scan_options: ScanOptions,
    /// 导入的文件要加入的事件
    pub event_ids: Vec<i64>,
}

/// 导入结果
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// 新文件的 ID
    pub file_ids: Vec<i64>,
    /// 失败的文件列表
    pub failed_files: Vec<String>,
}

impl ImportResult {
    pub fn imported(&self) -> usize {
        self.file_ids.len()
    }

    pub fn failed(&self) -> usize {
        self.failed_files.len()
    }
}

/// 文件导入器
pub struct Importer<'a, S: FileStore + ?Sized> {
    store: &'a S,
    options: ImportOptions,
}

impl<'a, S: FileStore + ?Sized> Importer<'a, S> {
    pub fn new(store: &'a S, options: ImportOptions) -> Self {
        Self { store, options }
    }

    /// 导入目录中的所有图片
    pub fn import_directory(&self, path: &Path) -> AppResult<ImportResult> {
        tracing::info!("开始导入目录: {}", path.display());
        let scan_result = Scanner::new(self.options.scan_options.clone()).scan_directory(path)?;
        self.import_files(&scan_result.files)
    }

    /// 导入文件列表。读取或哈希失败的文件被记录并跳过，存储错误直接返回
    pub fn import_files(&self, files: &[PathBuf]) -> AppResult<ImportResult> {
        for event_id in &self.options.event_ids {
            if self.store.get_event(*event_id)?.is_none() {
                return Err(AppError::General(format!("事件不存在: {}", event_id)));
            }
        }

        // 并行读取元数据并计算哈希
        let prepared: Vec<(&PathBuf, AppResult<NewFile>)> = files
            .par_iter()
            .map(|path| (path, prepare_file(path)))
            .collect();

        let mut result = ImportResult::default();
        for (path, prepared) in prepared {
            match prepared {
                Ok(new_file) => {
                    let file_id = self.store.add_file(&new_file, &self.options.event_ids)?;
                    result.file_ids.push(file_id);
                }
                Err(e) => {
                    tracing::warn!("跳过文件 {}: {}", path.display(), e);
                    result.failed_files.push(path.display().to_string());
                }
            }
        }

        tracing::info!(
            "导入完成: 成功 {}, 失败 {}",
            result.imported(),
            result.failed()
        );
        Ok(result)
    }
}

fn prepare_file(path: &Path) -> AppResult<NewFile> {
    let entry = DeviceEntry::from_path(path)?;
    let hash = FileHasher::hash_file(path)?;
    Ok(entry.to_new_file(hash))
}
