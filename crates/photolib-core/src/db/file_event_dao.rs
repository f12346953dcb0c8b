//! 文件-事件关联操作
//!
//! 批量关联/解除关联在单个事务中执行，语句按 `batch` 模块的上限拆分。

use rusqlite::{params, ToSql};

use crate::models::{EventRecord, FileRecord, Membership};
use crate::utils::error::AppResult;

use super::batch::{distinct_ids, DELETE_MEMBERSHIPS, INSERT_MEMBERSHIPS};
use super::connection::FileDb;
use super::event_dao::row_to_event;
use super::file_dao::{row_to_file, FILE_COLUMNS};

impl FileDb {
    /// 添加文件到事件
    pub fn assign_file_to_event(&self, file_id: i64, event_id: i64) -> AppResult<usize> {
        self.assign_files_to_event(&[file_id], event_id)
    }

    /// 批量添加文件到事件，返回新建的关联数。已存在的关联被忽略
    pub fn assign_files_to_event(&self, file_ids: &[i64], event_id: i64) -> AppResult<usize> {
        let ids = distinct_ids(file_ids);
        if ids.is_empty() {
            self.connection()?;
            return Ok(0);
        }

        let count = self.transaction(|conn| {
            INSERT_MEMBERSHIPS.execute(conn, &[&event_id as &dyn ToSql], &ids)
        })?;

        tracing::debug!("事件 {} 新增 {} 个文件", event_id, count);
        Ok(count)
    }

    /// 从事件移除文件
    pub fn delete_file_from_event(&self, file_id: i64, event_id: i64) -> AppResult<usize> {
        self.delete_files_from_event(&[file_id], event_id)
    }

    /// 批量从事件移除文件，返回删除的关联数
    pub fn delete_files_from_event(&self, file_ids: &[i64], event_id: i64) -> AppResult<usize> {
        let ids = distinct_ids(file_ids);
        if ids.is_empty() {
            self.connection()?;
            return Ok(0);
        }

        let count = self.transaction(|conn| {
            DELETE_MEMBERSHIPS.execute(conn, &[&event_id as &dyn ToSql], &ids)
        })?;

        tracing::debug!("事件 {} 移除 {} 个文件", event_id, count);
        Ok(count)
    }

    /// 获取事件中的所有文件
    pub fn get_files_by_event_id(&self, event_id: i64) -> AppResult<Vec<FileRecord>> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM files WHERE id IN (SELECT fileId FROM fileEvent WHERE eventId = ?1) ORDER BY id",
            FILE_COLUMNS
        ))?;
        let files = stmt
            .query_map(params![event_id], row_to_file)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(files)
    }

    /// 获取文件所属的所有事件
    pub fn get_events_for_file(&self, file_id: i64) -> AppResult<Vec<EventRecord>> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT e.id, e.name FROM events e
            INNER JOIN fileEvent fe ON e.id = fe.eventId
            WHERE fe.fileId = ?1
            ORDER BY e.id
            "#,
        )?;
        let events = stmt
            .query_map(params![file_id], row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// 获取全部关联
    pub fn get_memberships(&self) -> AppResult<Vec<Membership>> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare("SELECT fileId, eventId FROM fileEvent ORDER BY eventId, fileId")?;
        let memberships = stmt
            .query_map([], |row| {
                Ok(Membership {
                    file_id: row.get(0)?,
                    event_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(memberships)
    }
}
