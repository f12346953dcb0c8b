//! 文件数据访问层

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, ToSql};

use crate::models::file::{format_creation_date, parse_creation_date};
use crate::models::{FileRecord, NewFile};
use crate::utils::error::{AppError, AppResult};

use super::batch::{distinct_ids, DELETE_FILES, DELETE_FILE_MEMBERSHIPS, INSERT_MEMBERSHIPS};
use super::connection::FileDb;

/// 查询文件时使用的列，顺序与 `row_to_file` 的下标一致
pub(crate) const FILE_COLUMNS: &str = "id, filename, size, hash, path, creation";

/// 从数据库行映射到 FileRecord
pub(crate) fn row_to_file(row: &Row<'_>) -> rusqlite::Result<FileRecord> {
    let size: i64 = row.get(2)?;
    let creation: String = row.get(5)?;

    Ok(FileRecord {
        id: row.get(0)?,
        filename: row.get(1)?,
        size: u64::try_from(size)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, Box::new(e)))?,
        hash: row.get(3)?,
        path: row.get(4)?,
        creation_date: parse_creation_date(&creation)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?,
    })
}

/// 插入一行文件记录，返回新 ID
fn insert_file(conn: &Connection, file: &NewFile) -> AppResult<i64> {
    let size = i64::try_from(file.size)
        .map_err(|_| AppError::General(format!("文件过大: {} 字节", file.size)))?;

    let rows = conn.execute(
        "INSERT INTO files (filename, size, hash, path, creation) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            file.filename,
            size,
            file.hash,
            file.path,
            format_creation_date(&file.creation_date)
        ],
    )?;

    if rows == 0 {
        return Err(AppError::InsertFailed(format!("files: {}", file.path)));
    }

    Ok(conn.last_insert_rowid())
}

impl FileDb {
    // ==================== File CRUD ====================

    /// 添加文件，并在同一事务中关联到给定事件
    pub fn add_file(&self, file: &NewFile, event_ids: &[i64]) -> AppResult<i64> {
        let event_ids = distinct_ids(event_ids);

        self.transaction(|conn| {
            let file_id = insert_file(conn, file)?;

            for event_id in &event_ids {
                INSERT_MEMBERSHIPS.execute(conn, &[event_id as &dyn ToSql], &[file_id])?;
            }

            Ok(file_id)
        })
    }

    /// 根据 ID 获取文件
    pub fn get_file(&self, file_id: i64) -> AppResult<Option<FileRecord>> {
        let conn = self.connection()?;

        let result = conn.query_row(
            &format!("SELECT {} FROM files WHERE id = ?1", FILE_COLUMNS),
            params![file_id],
            row_to_file,
        );

        match result {
            Ok(file) => Ok(Some(file)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// 获取所有文件
    pub fn get_all_files(&self) -> AppResult<Vec<FileRecord>> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare(&format!("SELECT {} FROM files ORDER BY id", FILE_COLUMNS))?;
        let files = stmt
            .query_map([], row_to_file)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(files)
    }

    /// 删除文件
    pub fn delete_file(&self, file_id: i64) -> AppResult<()> {
        self.delete_files(&[file_id])
    }

    /// 批量删除文件及其事件关联。任一 ID 不存在时整体回滚
    pub fn delete_files(&self, file_ids: &[i64]) -> AppResult<()> {
        let ids = distinct_ids(file_ids);
        if ids.is_empty() {
            self.connection()?;
            return Ok(());
        }

        self.transaction(|conn| {
            let unlinked = DELETE_FILE_MEMBERSHIPS.execute(conn, &[], &ids)?;
            let deleted = DELETE_FILES.execute(conn, &[], &ids)?;

            if deleted != ids.len() {
                return Err(AppError::PartialDelete {
                    requested: ids.len(),
                    deleted,
                });
            }

            tracing::debug!("删除 {} 个文件, 解除 {} 个关联", deleted, unlinked);
            Ok(())
        })
    }

    /// 文件总数
    pub fn count_files(&self) -> AppResult<i64> {
        let conn = self.connection()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{open_test_db, sample_file};
    use chrono::{NaiveDate, Timelike};
    use std::collections::HashMap;

    #[test]
    fn test_insert_file_ids_are_unique_and_increasing() {
        let (_tmp, db) = open_test_db();

        let mut last = 0;
        for i in 0..20 {
            let id = db.add_file(&sample_file(i), &[]).unwrap();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn test_get_all_files_matches_inserted() {
        let (_tmp, db) = open_test_db();

        let mut inserted: HashMap<i64, NewFile> = HashMap::new();
        for i in 0..10 {
            let file = sample_file(i);
            let id = db.add_file(&file, &[]).unwrap();
            assert!(inserted.insert(id, file).is_none());
        }

        let records = db.get_all_files().unwrap();
        assert_eq!(records.len(), 10);

        for record in records {
            let expected = inserted.remove(&record.id).unwrap();
            assert_eq!(record, expected.into_record(record.id));
        }
        assert!(inserted.is_empty());
    }

    #[test]
    fn test_creation_date_truncated_to_seconds() {
        let (_tmp, db) = open_test_db();
        let date = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_milli_opt(12, 34, 56, 789)
            .unwrap();
        let file = NewFile::new("leap.jpg", 10, "00ff", "/photos/leap.jpg", date);

        let id = db.add_file(&file, &[]).unwrap();

        let stored = db.get_file(id).unwrap().unwrap();
        assert_eq!(stored.creation_date.nanosecond(), 0);
        assert_eq!(stored.creation_date, date.with_nanosecond(0).unwrap());
    }

    #[test]
    fn test_leap_second_round_trip() {
        let (_tmp, db) = open_test_db();
        let date = NaiveDate::from_ymd_opt(2016, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 1_500)
            .unwrap();
        let file = NewFile::new("leap.jpg", 10, "00ff", "/photos/leap.jpg", date);

        let id = db.add_file(&file, &[]).unwrap();

        assert_eq!(db.get_file(id).unwrap().unwrap(), file.into_record(id));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (_tmp, db) = open_test_db();
        let first = db.add_file(&sample_file(1), &[]).unwrap();
        let highest = db.add_file(&sample_file(2), &[]).unwrap();

        db.delete_file(highest).unwrap();
        let next = db.add_file(&sample_file(3), &[]).unwrap();

        assert!(next > highest);
        assert_ne!(next, first);
    }

    #[test]
    fn test_duplicate_hash_and_path_allowed() {
        let (_tmp, db) = open_test_db();
        let file = sample_file(1);

        let first = db.add_file(&file, &[]).unwrap();
        let second = db.add_file(&file, &[]).unwrap();

        assert_ne!(first, second);
        assert_eq!(db.get_all_files().unwrap().len(), 2);
    }

    #[test]
    fn test_get_missing_file_returns_none() {
        let (_tmp, db) = open_test_db();
        assert!(db.get_file(42).unwrap().is_none());
    }

    #[test]
    fn test_delete_files() {
        let (_tmp, db) = open_test_db();
        let ids: Vec<i64> = (0..10)
            .map(|i| db.add_file(&sample_file(i), &[]).unwrap())
            .collect();

        let (first_half, second_half) = ids.split_at(5);
        db.delete_files(first_half).unwrap();

        let remaining: Vec<i64> = db.get_all_files().unwrap().iter().map(|f| f.id).collect();
        assert_eq!(remaining, second_half.to_vec());

        for id in second_half {
            db.delete_file(*id).unwrap();
        }
        assert!(db.get_all_files().unwrap().is_empty());
    }

    #[test]
    fn test_delete_nonexistent_file_is_partial_delete() {
        let (_tmp, db) = open_test_db();
        let id = db.add_file(&sample_file(1), &[]).unwrap();

        let err = db.delete_files(&[id, id + 100]).unwrap_err();
        assert!(matches!(
            err,
            AppError::PartialDelete {
                requested: 2,
                deleted: 1
            }
        ));

        // 事务回滚，已有文件保留
        assert_eq!(db.get_all_files().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_file_removes_memberships() {
        let (_tmp, db) = open_test_db();
        let event_id = db.add_event("Vacation2024").unwrap();
        let kept = db.add_file(&sample_file(1), &[event_id]).unwrap();
        let removed = db.add_file(&sample_file(2), &[event_id]).unwrap();

        db.delete_file(removed).unwrap();

        let members: Vec<i64> = db
            .get_files_by_event_id(event_id)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(members, vec![kept]);
        assert_eq!(db.get_memberships().unwrap().len(), 1);
    }

    #[test]
    fn test_add_file_with_missing_event_rolls_back() {
        let (_tmp, db) = open_test_db();

        let result = db.add_file(&sample_file(1), &[999]);

        assert!(matches!(result, Err(AppError::Database(_))));
        assert!(db.get_all_files().unwrap().is_empty());
    }

    #[test]
    fn test_delete_empty_set_is_noop() {
        let (_tmp, db) = open_test_db();
        db.add_file(&sample_file(1), &[]).unwrap();
        db.delete_files(&[]).unwrap();
        assert_eq!(db.count_files().unwrap(), 1);
    }
}
