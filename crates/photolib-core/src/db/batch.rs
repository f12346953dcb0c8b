//! 批量语句构造
//!
//! 大量 ID 的插入/删除会被拆分成多条语句，每条语句中累积的
//! VALUES / IN 子句长度不超过上限。所有值都通过编号占位符绑定。

use std::collections::HashSet;

use rusqlite::{Connection, ToSql};

use crate::utils::error::AppResult;

/// 单条语句中累积子句的最大长度（字符）
pub const MAX_CLAUSE_LEN: usize = 4096;

/// 一次刷出的批次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 累积的子句，例如 `(?2, ?1), (?3, ?1)`
    pub clause: String,
    /// 按占位符顺序绑定的 ID
    pub ids: Vec<i64>,
}

/// 批量语句模板
///
/// 最终 SQL 为 `prefix + clause + suffix`。前 `shared_params` 个占位符
/// 留给每个批次共享的参数（例如事件 ID），ID 从其后开始编号。
#[derive(Debug, Clone, Copy)]
pub struct BatchStatement {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub separator: &'static str,
    pub shared_params: usize,
    pub row: fn(usize) -> String,
    pub ceiling: usize,
}

fn membership_row(index: usize) -> String {
    format!("(?{}, ?1)", index)
}

fn placeholder(index: usize) -> String {
    format!("?{}", index)
}

/// 插入文件-事件关联，重复的关联被忽略
pub const INSERT_MEMBERSHIPS: BatchStatement = BatchStatement {
    prefix: "INSERT OR IGNORE INTO fileEvent (fileId, eventId) VALUES ",
    suffix: "",
    separator: ", ",
    shared_params: 1,
    row: membership_row,
    ceiling: MAX_CLAUSE_LEN,
};

/// 从一个事件中移除文件
pub const DELETE_MEMBERSHIPS: BatchStatement = BatchStatement {
    prefix: "DELETE FROM fileEvent WHERE eventId = ?1 AND fileId IN (",
    suffix: ")",
    separator: ", ",
    shared_params: 1,
    row: placeholder,
    ceiling: MAX_CLAUSE_LEN,
};

/// 删除文件的所有关联
pub const DELETE_FILE_MEMBERSHIPS: BatchStatement = BatchStatement {
    prefix: "DELETE FROM fileEvent WHERE fileId IN (",
    suffix: ")",
    separator: ", ",
    shared_params: 0,
    row: placeholder,
    ceiling: MAX_CLAUSE_LEN,
};

/// 删除事件的所有关联
pub const DELETE_EVENT_MEMBERSHIPS: BatchStatement = BatchStatement {
    prefix: "DELETE FROM fileEvent WHERE eventId IN (",
    suffix: ")",
    separator: ", ",
    shared_params: 0,
    row: placeholder,
    ceiling: MAX_CLAUSE_LEN,
};

pub const DELETE_FILES: BatchStatement = BatchStatement {
    prefix: "DELETE FROM files WHERE id IN (",
    suffix: ")",
    separator: ", ",
    shared_params: 0,
    row: placeholder,
    ceiling: MAX_CLAUSE_LEN,
};

pub const DELETE_EVENTS: BatchStatement = BatchStatement {
    prefix: "DELETE FROM events WHERE id IN (",
    suffix: ")",
    separator: ", ",
    shared_params: 0,
    row: placeholder,
    ceiling: MAX_CLAUSE_LEN,
};

impl BatchStatement {
    /// 将 ID 拆分为批次。追加下一行会超出上限时先刷出当前批次
    pub fn batches(&self, ids: &[i64]) -> Vec<Batch> {
        let mut batches = Vec::new();
        let mut clause = String::new();
        let mut pending: Vec<i64> = Vec::new();

        for &id in ids {
            let mut fragment = (self.row)(self.shared_params + pending.len() + 1);

            if !pending.is_empty()
                && clause.len() + self.separator.len() + fragment.len() > self.ceiling
            {
                batches.push(Batch {
                    clause: std::mem::take(&mut clause),
                    ids: std::mem::take(&mut pending),
                });
                fragment = (self.row)(self.shared_params + 1);
            }

            if !pending.is_empty() {
                clause.push_str(self.separator);
            }
            clause.push_str(&fragment);
            pending.push(id);
        }

        if !pending.is_empty() {
            batches.push(Batch {
                clause,
                ids: pending,
            });
        }

        batches
    }

    /// 在给定连接（通常是事务）上执行所有批次，返回受影响的总行数
    pub fn execute(&self, conn: &Connection, shared: &[&dyn ToSql], ids: &[i64]) -> AppResult<usize> {
        debug_assert_eq!(shared.len(), self.shared_params);

        let mut affected = 0;
        for batch in self.batches(ids) {
            let sql = format!("{}{}{}", self.prefix, batch.clause, self.suffix);

            let mut params_refs: Vec<&dyn ToSql> = Vec::with_capacity(shared.len() + batch.ids.len());
            params_refs.extend_from_slice(shared);
            params_refs.extend(batch.ids.iter().map(|id| id as &dyn ToSql));

            let rows = conn.execute(&sql, params_refs.as_slice())?;
            tracing::debug!(
                "批量语句刷出: {} 个 ID, 子句长度 {}, 影响 {} 行",
                batch.ids.len(),
                batch.clause.len(),
                rows
            );
            affected += rows;
        }

        Ok(affected)
    }
}

/// 去重并保持原有顺序
pub fn distinct_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
