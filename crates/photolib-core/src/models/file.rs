//! 文件数据模型

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// 数据库中 `creation` 列的存储格式（秒精度）
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 文件记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// 文件ID（由存储分配）
    pub id: i64,
    /// 文件名
    pub filename: String,
    /// 文件大小（字节）
    pub size: u64,
    /// 内容哈希
    pub hash: String,
    /// 文件路径
    pub path: String,
    /// 创建时间
    pub creation_date: NaiveDateTime,
}

/// 用于插入新文件的输入结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFile {
    pub filename: String,
    pub size: u64,
    pub hash: String,
    pub path: String,
    pub creation_date: NaiveDateTime,
}

impl NewFile {
    pub fn new(
        filename: impl Into<String>,
        size: u64,
        hash: impl Into<String>,
        path: impl Into<String>,
        creation_date: NaiveDateTime,
    ) -> Self {
        Self {
            filename: filename.into(),
            size,
            hash: hash.into(),
            path: path.into(),
            creation_date,
        }
    }

    /// 以存储分配的 ID 生成完整记录，时间截断到秒
    pub fn into_record(self, id: i64) -> FileRecord {
        FileRecord {
            id,
            filename: self.filename,
            size: self.size,
            hash: self.hash,
            path: self.path,
            creation_date: truncate_to_seconds(self.creation_date),
        }
    }
}

/// 去掉亚秒部分。闰秒折叠为同一分钟的第 59 秒
pub fn truncate_to_seconds(date: NaiveDateTime) -> NaiveDateTime {
    date.with_nanosecond(0).unwrap_or(date)
}

/// 格式化为存储格式，先截断到秒，保证读回的值与 `truncate_to_seconds` 一致
pub fn format_creation_date(date: &NaiveDateTime) -> String {
    truncate_to_seconds(*date)
        .format(CREATION_DATE_FORMAT)
        .to_string()
}

/// 解析存储格式
pub fn parse_creation_date(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, CREATION_DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_truncate_to_seconds() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14)
            .unwrap()
            .and_hms_milli_opt(10, 30, 15, 789)
            .unwrap();
        let truncated = truncate_to_seconds(date);
        assert_eq!(truncated.nanosecond(), 0);
        assert_eq!(truncated.second(), 15);
    }

    #[test]
    fn test_creation_date_format() {
        let date = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 58)
            .unwrap();
        let text = format_creation_date(&date);
        assert_eq!(text, "1999-12-31 23:59:58");
        assert_eq!(parse_creation_date(&text).unwrap(), date);
    }

    #[test]
    fn test_leap_second_stored_as_truncated() {
        let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 1_500)
            .unwrap();

        let text = format_creation_date(&leap);
        assert_eq!(text, "2016-12-31 23:59:59");
        assert_eq!(parse_creation_date(&text).unwrap(), truncate_to_seconds(leap));
    }

    #[test]
    fn test_into_record() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_micro_opt(0, 0, 1, 500)
            .unwrap();
        let record = NewFile::new("a.jpg", 1024, "ab", "/p/a.jpg", date).into_record(7);
        assert_eq!(record.id, 7);
        assert_eq!(record.creation_date, truncate_to_seconds(date));
    }
}
