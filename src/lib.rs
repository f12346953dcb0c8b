//! PhotoLibrary - Windows 照片管理软件
//!
//! 应用入口：初始化日志、加载设置并打开文件/事件存储。
//! 所有组件在这里显式构造并传递，不使用全局容器。

pub mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use photolib_core::{
    DesktopPathProvider, ImportOptions, PathProvider, PhotoLibraryCore, SharedPathProvider,
};

/// 启动参数
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// 启动后要导入的目录
    pub import_dirs: Vec<PathBuf>,
}

impl LaunchOptions {
    /// 从命令行参数构造，每个参数视为一个待导入目录
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        Self {
            import_dirs: args.into_iter().map(PathBuf::from).collect(),
        }
    }
}

/// 运行应用
pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let path_provider: SharedPathProvider = Arc::new(DesktopPathProvider::new());

    // 初始化日志系统，guard 需存活到退出
    let _guard = logging::init(&path_provider.logs_dir());

    tracing::info!("PhotoLibrary 启动中...");

    let result = run_with_provider(path_provider, &options);
    if let Err(e) = &result {
        tracing::error!("PhotoLibrary 异常退出: {:#}", e);
    }
    result
}

/// 使用给定的路径提供者运行
pub fn run_with_provider(
    path_provider: SharedPathProvider,
    options: &LaunchOptions,
) -> anyhow::Result<()> {
    let mut core = PhotoLibraryCore::new(path_provider)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))
        .context("无法打开照片库")?;

    let stats = core.store().stats()?;
    tracing::info!(
        "照片库已就绪: {} 个文件, {} 个事件",
        stats.file_count,
        stats.event_count
    );

    for dir in &options.import_dirs {
        let result = core
            .import_directory(dir, ImportOptions::default())
            .with_context(|| format!("导入目录失败: {}", dir.display()))?;
        tracing::info!(
            "已导入 {}: 成功 {}, 失败 {}",
            dir.display(),
            result.imported(),
            result.failed()
        );
    }

    core.shutdown().context("关闭数据库失败")?;
    tracing::info!("PhotoLibrary 已退出");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use photolib_core::{ApplicationSettings, FileDb, StoreSettings};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_args() {
        let options = LaunchOptions::from_args(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(options.import_dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }

    #[test]
    fn test_run_imports_directories() {
        let tmp = TempDir::new().unwrap();
        let provider: SharedPathProvider =
            Arc::new(DesktopPathProvider::with_base_dir(tmp.path().to_path_buf()));

        let photos = tmp.path().join("camera");
        fs::create_dir_all(&photos).unwrap();
        fs::write(photos.join("one.jpg"), b"1").unwrap();
        fs::write(photos.join("two.jpg"), b"2").unwrap();

        let options = LaunchOptions {
            import_dirs: vec![photos],
        };
        run_with_provider(provider.clone(), &options).unwrap();

        let settings = ApplicationSettings {
            version: 1,
            database_path: provider
                .default_database_path()
                .to_string_lossy()
                .into_owned(),
        };
        assert!(settings.database_path().exists());

        let mut db = FileDb::new(Arc::new(settings));
        db.init().unwrap();
        assert_eq!(db.get_all_files().unwrap().len(), 2);
        db.deinit().unwrap();
    }

    #[test]
    fn test_run_fails_on_missing_import_dir() {
        let tmp = TempDir::new().unwrap();
        let provider: SharedPathProvider =
            Arc::new(DesktopPathProvider::with_base_dir(tmp.path().to_path_buf()));

        let options = LaunchOptions {
            import_dirs: vec![tmp.path().join("missing")],
        };
        assert!(run_with_provider(provider, &options).is_err());
    }
}
