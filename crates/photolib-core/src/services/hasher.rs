//! 文件哈希服务
//!
//! 负责计算文件内容的哈希值

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use xxhash_rust::xxh3::Xxh3;

use crate::utils::error::{AppError, AppResult};

/// 哈希字符串长度（xxh3-128 的十六进制表示）
pub const HASH_LEN: usize = 32;

/// 文件哈希计算器
pub struct FileHasher;

impl FileHasher {
    /// 计算文件的完整哈希值
    pub fn hash_file(path: &Path) -> AppResult<String> {
        if !path.exists() {
            return Err(AppError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("无法打开文件 {}: {}", path.display(), e),
            ))
        })?;

        Self::hash_reader(&mut BufReader::new(file))
    }

    /// 流式计算哈希，不把整个文件读入内存
    pub fn hash_reader<R: Read>(reader: &mut R) -> AppResult<String> {
        let mut hasher = Xxh3::new();
        let mut buffer = [0u8; 64 * 1024];

        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(format!("{:032x}", hasher.digest128()))
    }
}
