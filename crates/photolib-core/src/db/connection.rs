//! 数据库连接管理
//!
//! 负责数据库文件的创建、打开、关闭以及 Schema 初始化。
//! 存储是惰性打开的：构造时不触碰文件系统，`init` 时才打开连接。

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::utils::error::{AppError, AppResult};

use super::schema::{INIT_SCHEMA, MIGRATIONS, SCHEMA_VERSION};

/// 存储所需的设置（由外部设置提供者实现）
pub trait StoreSettings: Send + Sync {
    /// 数据库文件的绝对路径，在存储生命周期内只读
    fn database_path(&self) -> PathBuf;
}

/// 存储生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Unopened,
    Open,
    Closed,
}

enum StoreState {
    Unopened,
    Open(Connection),
    Closed,
}

/// 文件/事件存储
pub struct FileDb {
    settings: Arc<dyn StoreSettings>,
    state: StoreState,
}

impl FileDb {
    /// 创建存储句柄，不打开连接
    pub fn new(settings: Arc<dyn StoreSettings>) -> Self {
        Self {
            settings,
            state: StoreState::Unopened,
        }
    }

    /// 打开数据库，必要时创建目录和表
    pub fn init(&mut self) -> AppResult<()> {
        self.open_with_schema(INIT_SCHEMA)
    }

    fn open_with_schema(&mut self, schema: &str) -> AppResult<()> {
        if let StoreState::Open(_) = self.state {
            tracing::debug!("数据库已打开，忽略重复初始化");
            return Ok(());
        }

        let path = self.settings.database_path();
        let create_tables = !path.exists();

        if create_tables {
            create_missing_folders(&path)?;
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| unavailable(&path, e))?;

        let prepared = configure(&conn)
            .map_err(|e| unavailable(&path, e))
            .and_then(|()| {
                if create_tables {
                    tracing::info!("创建数据库: {}", path.display());
                    create_schema(&conn, schema)
                } else {
                    tracing::info!("打开已有数据库: {}", path.display());
                    check_version(&conn)
                }
            });

        if let Err(e) = prepared {
            drop(conn);
            // 新建的文件没有完整的表，保留它会让下次 init 跳过建表
            if create_tables {
                remove_database_files(&path);
            }
            return Err(e);
        }

        self.state = StoreState::Open(conn);
        Ok(())
    }

    /// 关闭连接。未打开时为空操作
    pub fn deinit(&mut self) -> AppResult<()> {
        match std::mem::replace(&mut self.state, StoreState::Closed) {
            StoreState::Open(conn) => {
                conn.close().map_err(|(_, e)| AppError::Database(e))?;
                tracing::info!("数据库连接已关闭");
            }
            StoreState::Unopened => self.state = StoreState::Unopened,
            StoreState::Closed => {}
        }
        Ok(())
    }

    /// 当前生命周期状态
    pub fn status(&self) -> StoreStatus {
        match self.state {
            StoreState::Unopened => StoreStatus::Unopened,
            StoreState::Open(_) => StoreStatus::Open,
            StoreState::Closed => StoreStatus::Closed,
        }
    }

    /// 获取数据库文件路径
    pub fn path(&self) -> PathBuf {
        self.settings.database_path()
    }

    /// 获取数据库连接，仅在 Open 状态下可用
    pub(crate) fn connection(&self) -> AppResult<&Connection> {
        match &self.state {
            StoreState::Open(conn) => Ok(conn),
            _ => Err(AppError::NotInitialized),
        }
    }

    /// 执行事务，闭包返回错误时整体回滚
    pub(crate) fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = self.connection()?;
        let tx = conn.unchecked_transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// 获取数据库统计信息
    pub fn stats(&self) -> AppResult<DatabaseStats> {
        let conn = self.connection()?;

        let file_count = self.count_files()?;
        let event_count = self.count_events()?;
        let membership_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM fileEvent", [], |row| row.get(0))?;

        let db_size = std::fs::metadata(self.path())
            .map(|m| m.len() as i64)
            .unwrap_or(0);

        Ok(DatabaseStats {
            file_count,
            event_count,
            membership_count,
            db_size,
        })
    }
}

/// 数据库统计信息
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub file_count: i64,
    pub event_count: i64,
    pub membership_count: i64,
    pub db_size: i64,
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::StorageUnavailable {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// 创建数据库文件所在的目录
fn create_missing_folders(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| unavailable(path, e))
        }
        _ => Ok(()),
    }
}

/// 在单个事务中建表并写入版本号
fn create_schema(conn: &Connection, schema: &str) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(schema)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    tracing::info!("数据库 Schema 初始化完成，版本: {}", SCHEMA_VERSION);
    Ok(())
}

/// 删除数据库文件及 WAL 附属文件
fn remove_database_files(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut target = path.as_os_str().to_owned();
        target.push(suffix);
        let target = PathBuf::from(target);
        if target.exists() {
            if let Err(e) = std::fs::remove_file(&target) {
                tracing::warn!("无法删除未完成的数据库文件 {}: {}", target.display(), e);
            }
        }
    }
}

/// 配置数据库连接
fn configure(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        "#,
    )
}

/// 比较磁盘上的版本与当前版本
fn check_version(conn: &Connection) -> AppResult<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version > SCHEMA_VERSION {
        tracing::warn!(
            "数据库版本 {} 高于程序支持的版本 {}",
            current_version,
            SCHEMA_VERSION
        );
        return Ok(());
    }

    for migration in MIGRATIONS {
        if migration.version > current_version {
            tracing::info!("执行迁移 v{}: {}", migration.version, migration.description);
            conn.execute_batch(migration.sql)?;
        }
    }

    if current_version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }

    Ok(())
}
