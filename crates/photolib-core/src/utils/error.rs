//! PhotoLibrary 错误处理模块
//!
//! 定义存储层与服务层共用的错误类型

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据库错误
    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 数据库文件无法创建或打开
    #[error("存储不可用: {path}: {reason}")]
    StorageUnavailable { path: String, reason: String },

    /// 存储尚未初始化或已关闭
    #[error("存储未初始化")]
    NotInitialized,

    /// 插入未影响任何行
    #[error("无法插入记录: {0}")]
    InsertFailed(String),

    /// 实际删除的行数与请求数量不一致
    #[error("部分删除: 请求 {requested} 行, 实际删除 {deleted} 行")]
    PartialDelete { requested: usize, deleted: usize },

    /// 路径无效
    #[error("路径无效: {0}")]
    InvalidPath(String),

    /// 文件未找到
    #[error("文件未找到: {0}")]
    FileNotFound(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 通用错误
    #[error("{0}")]
    General(String),
}

impl AppError {
    /// 稳定的错误码，供前端与日志使用
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "E_DB_ERROR",
            AppError::Io(_) => "E_IO_ERROR",
            AppError::StorageUnavailable { .. } => "E_STORAGE_UNAVAILABLE",
            AppError::NotInitialized => "E_NOT_INITIALIZED",
            AppError::InsertFailed(_) => "E_INSERT_FAILED",
            AppError::PartialDelete { .. } => "E_PARTIAL_DELETE",
            AppError::InvalidPath(_) => "E_PATH_INVALID",
            AppError::FileNotFound(_) => "E_FILE_NOT_FOUND",
            AppError::Config(_) => "E_CONFIG",
            AppError::General(_) => "E_GENERAL",
        }
    }
}

/// 应用程序结果类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::FileNotFound("test.jpg".to_string());
        assert_eq!(err.to_string(), "文件未找到: test.jpg");
    }

    #[test]
    fn test_partial_delete_display() {
        let err = AppError::PartialDelete {
            requested: 3,
            deleted: 2,
        };
        assert_eq!(err.to_string(), "部分删除: 请求 3 行, 实际删除 2 行");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotInitialized.code(), "E_NOT_INITIALIZED");
        assert_eq!(AppError::InsertFailed("events".into()).code(), "E_INSERT_FAILED");
        assert_eq!(AppError::NotInitialized.to_string(), "存储未初始化");
    }
}
