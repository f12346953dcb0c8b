//! 事件数据访问层

use rusqlite::{params, Row};

use crate::models::EventRecord;
use crate::utils::error::{AppError, AppResult};

use super::batch::{distinct_ids, DELETE_EVENTS, DELETE_EVENT_MEMBERSHIPS};
use super::connection::FileDb;

/// 从数据库行映射到 EventRecord
pub(crate) fn row_to_event(row: &Row<'_>) -> rusqlite::Result<EventRecord> {
    Ok(EventRecord {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

impl FileDb {
    // ==================== Event CRUD ====================

    /// 创建事件
    pub fn add_event(&self, event_name: &str) -> AppResult<i64> {
        let conn = self.connection()?;

        let rows = conn.execute("INSERT INTO events (name) VALUES (?1)", params![event_name])?;
        if rows == 0 {
            return Err(AppError::InsertFailed(format!("events: {}", event_name)));
        }

        Ok(conn.last_insert_rowid())
    }

    /// 根据 ID 获取事件
    pub fn get_event(&self, event_id: i64) -> AppResult<Option<EventRecord>> {
        let conn = self.connection()?;

        let result = conn.query_row(
            "SELECT id, name FROM events WHERE id = ?1",
            params![event_id],
            row_to_event,
        );

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// 获取所有事件
    pub fn get_all_events(&self) -> AppResult<Vec<EventRecord>> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare("SELECT id, name FROM events ORDER BY id")?;
        let events = stmt
            .query_map([], row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// 删除事件
    pub fn delete_event(&self, event_id: i64) -> AppResult<()> {
        self.delete_events(&[event_id])
    }

    /// 批量删除事件及其文件关联。任一 ID 不存在时整体回滚
    pub fn delete_events(&self, event_ids: &[i64]) -> AppResult<()> {
        let ids = distinct_ids(event_ids);
        if ids.is_empty() {
            self.connection()?;
            return Ok(());
        }

        self.transaction(|conn| {
            DELETE_EVENT_MEMBERSHIPS.execute(conn, &[], &ids)?;
            let deleted = DELETE_EVENTS.execute(conn, &[], &ids)?;

            if deleted != ids.len() {
                return Err(AppError::PartialDelete {
                    requested: ids.len(),
                    deleted,
                });
            }

            Ok(())
        })
    }

    /// 事件总数
    pub fn count_events(&self) -> AppResult<i64> {
        let conn = self.connection()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?)
    }
}
