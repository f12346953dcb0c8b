//! 磁盘上的文件条目

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::file::truncate_to_seconds;
use crate::models::NewFile;
use crate::utils::error::{AppError, AppResult};

/// 从文件系统读取的文件信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub path: PathBuf,
    /// 最后修改时间（UTC，秒精度）
    pub last_modified: NaiveDateTime,
    pub file_size: u64,
}

impl DeviceEntry {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let metadata = std::fs::metadata(path)
            .map_err(|_| AppError::FileNotFound(path.display().to_string()))?;

        if !metadata.is_file() {
            return Err(AppError::InvalidPath(format!("不是文件: {}", path.display())));
        }

        let modified: DateTime<Utc> = metadata.modified()?.into();

        Ok(Self {
            path: path.to_path_buf(),
            last_modified: truncate_to_seconds(modified.naive_utc()),
            file_size: metadata.len(),
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// 结合内容哈希生成待插入的文件记录
    pub fn to_new_file(&self, hash: String) -> NewFile {
        NewFile {
            filename: self.file_name(),
            size: self.file_size,
            hash,
            path: self.path.to_string_lossy().into_owned(),
            creation_date: self.last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("IMG_0001.jpg");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let entry = DeviceEntry::from_path(&path).unwrap();

        assert_eq!(entry.file_size, 2048);
        assert_eq!(entry.file_name(), "IMG_0001.jpg");
        assert_eq!(entry.last_modified.nanosecond(), 0);

        let new_file = entry.to_new_file("ab".repeat(16));
        assert_eq!(new_file.size, 2048);
        assert_eq!(new_file.path, path.to_string_lossy());
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = DeviceEntry::from_path(&tmp.path().join("missing.jpg"));
        assert!(matches!(result, Err(AppError::FileNotFound(_))));
    }

    #[test]
    fn test_directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let result = DeviceEntry::from_path(tmp.path());
        assert!(matches!(result, Err(AppError::InvalidPath(_))));
    }
}
