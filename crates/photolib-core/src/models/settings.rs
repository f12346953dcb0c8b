//! 应用程序设置数据模型
//!
//! 每个设置类型都显式声明自己的字段表（名称 + 类型标记），
//! 加载时按字段表校验 JSON，不依赖运行时反射。

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::db::StoreSettings;
use crate::paths::PathProvider;

/// 设置字段的类型标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Integer,
    Float,
    String,
}

impl SettingKind {
    /// JSON 值是否符合该类型
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            SettingKind::Integer => value.is_i64() || value.is_u64(),
            SettingKind::Float => value.is_number(),
            SettingKind::String => value.is_string(),
        }
    }
}

/// 字段声明
#[derive(Debug, Clone, Copy)]
pub struct SettingField {
    pub name: &'static str,
    pub kind: SettingKind,
}

/// 可持久化的设置类型
pub trait Settings: Serialize + DeserializeOwned {
    /// 设置文件名（不含扩展名）
    const NAME: &'static str;
    /// 当前版本
    const VERSION: i32;
    /// 字段表，必须包含 `version`
    const FIELDS: &'static [SettingField];

    /// 默认值
    fn defaults(paths: &dyn PathProvider) -> Self;

    /// 已加载的版本号
    fn version(&self) -> i32;

    fn set_version(&mut self, version: i32);
}

/// 应用程序设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSettings {
    /// 设置版本
    #[serde(rename = "Version")]
    pub version: i32,
    /// 数据库文件的绝对路径
    #[serde(rename = "DatabasePath")]
    pub database_path: String,
}

impl Settings for ApplicationSettings {
    const NAME: &'static str = "ApplicationSettings";
    const VERSION: i32 = 1;
    const FIELDS: &'static [SettingField] = &[
        SettingField {
            name: "Version",
            kind: SettingKind::Integer,
        },
        SettingField {
            name: "DatabasePath",
            kind: SettingKind::String,
        },
    ];

    fn defaults(paths: &dyn PathProvider) -> Self {
        Self {
            version: Self::VERSION,
            database_path: paths.default_database_path().to_string_lossy().into_owned(),
        }
    }

    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }
}

impl StoreSettings for ApplicationSettings {
    fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }
}
