//! 数据库 Schema 定义
//!
//! 包含所有表的 CREATE 语句和版本信息

/// 数据库版本（记录在 `PRAGMA user_version`）
pub const SCHEMA_VERSION: i32 = 1;

/// 初始化 Schema SQL
pub const INIT_SCHEMA: &str = r#"
-- 文件表
CREATE TABLE files (
    id              INTEGER PRIMARY KEY ASC AUTOINCREMENT,
    filename        VARCHAR(256),
    size            INT,
    hash            CHARACTER(64),
    path            VARCHAR(256),
    creation        DATETIME
);

-- 事件表
CREATE TABLE events (
    id              INTEGER PRIMARY KEY ASC AUTOINCREMENT,
    name            VARCHAR(256)
);

-- 文件-事件关联表
CREATE TABLE fileEvent (
    fileId          INTEGER REFERENCES files (id),
    eventId         INTEGER REFERENCES events (id),
    PRIMARY KEY (fileId, eventId)
);

-- 索引
CREATE INDEX idx_file_event_event_id ON fileEvent(eventId);
"#;

/// 迁移脚本
pub struct Migration {
    pub version: i32,
    pub description: &'static str,
    pub sql: &'static str,
}

/// 已知迁移（目前只有初始版本）
pub const MIGRATIONS: &[Migration] = &[];
