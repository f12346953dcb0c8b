//! 事件数据模型

use serde::{Deserialize, Serialize};

/// 事件记录（一组照片，例如一次旅行）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// 事件ID
    pub id: i64,
    /// 事件名（允许重复）
    pub name: String,
}

/// 文件-事件关联
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub file_id: i64,
    pub event_id: i64,
}
