//! 日志初始化
//!
//! 控制台输出 + 按天滚动的日志文件

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// 日志文件名前缀
pub const LOG_FILE_PREFIX: &str = "photolibrary.log";

/// 初始化日志系统
///
/// 返回的 guard 必须保持存活，否则文件日志会丢失尾部内容。
/// 日志目录无法创建时只输出到控制台。
pub fn init(logs_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let console = fmt::layer().with_target(false);

    match std::fs::create_dir_all(logs_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer().with_writer(writer).with_ansi(false);

            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file)
                .try_init();
            Some(guard)
        }
        Err(e) => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init();
            tracing::warn!("无法创建日志目录 {}: {}", logs_dir.display(), e);
            None
        }
    }
}
