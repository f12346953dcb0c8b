//! PhotoLibrary 数据模型模块
//!
//! 包含所有数据结构定义

pub mod event;
pub mod file;
pub mod settings;

// 重新导出常用类型
pub use event::{EventRecord, Membership};
pub use file::{FileRecord, NewFile};
pub use settings::{ApplicationSettings, SettingField, SettingKind, Settings};
