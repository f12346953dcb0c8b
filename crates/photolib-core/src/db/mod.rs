//! PhotoLibrary 数据库模块
//!
//! 包含数据库连接管理、批量语句构造和数据访问层

pub mod batch;
pub mod connection;
pub mod event_dao;
pub mod file_dao;
pub mod file_event_dao;
pub mod schema;
pub mod store;

// 重新导出常用类型
pub use connection::{DatabaseStats, FileDb, StoreSettings, StoreStatus};
pub use store::FileStore;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::Arc;

    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    use super::{FileDb, StoreSettings};
    use crate::models::NewFile;

    /// 固定路径的设置
    pub struct TestSettings(pub PathBuf);

    impl StoreSettings for TestSettings {
        fn database_path(&self) -> PathBuf {
            self.0.clone()
        }
    }

    /// 在临时目录中打开一个已初始化的存储
    pub fn open_test_db() -> (TempDir, FileDb) {
        let tmp = TempDir::new().unwrap();
        let mut db = FileDb::new(Arc::new(TestSettings(tmp.path().join("test.db"))));
        db.init().unwrap();
        (tmp, db)
    }

    /// 按序号生成确定的文件数据，时间为整秒
    pub fn sample_file(seed: i64) -> NewFile {
        let hash = format!("{:064x}", (seed as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));
        let base = NaiveDate::from_ymd_opt(1950, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        NewFile::new(
            format!("IMG_{:05}.jpg", seed),
            4096 + (seed as u64) * 1024,
            hash.clone(),
            hash[..2].to_string(),
            base + Duration::seconds(seed * 86_399),
        )
    }
}
