//! 应用程序设置服务
//!
//! 负责设置的读取、保存和管理。每种设置保存在配置目录下的
//! `<名称>.json` 中，字段按 `Settings::FIELDS` 校验。

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::models::Settings;
use crate::paths::SharedPathProvider;
use crate::utils::error::{AppError, AppResult};

/// 设置管理器
pub struct SettingsManager {
    config_dir: PathBuf,
    paths: SharedPathProvider,
}

impl SettingsManager {
    /// 使用 PathProvider 创建设置管理器
    pub fn new(paths: SharedPathProvider) -> AppResult<Self> {
        let config_dir = paths.config_dir();

        // 确保配置目录存在
        fs::create_dir_all(&config_dir)
            .map_err(|e| AppError::Config(format!("无法创建配置目录: {}", e)))?;

        Ok(Self { config_dir, paths })
    }

    /// 某种设置的文件路径
    pub fn path_for<S: Settings>(&self) -> PathBuf {
        self.config_dir.join(format!("{}.json", S::NAME))
    }

    /// 加载设置。文件不存在时写入并返回默认值
    pub fn load<S: Settings>(&self) -> AppResult<S> {
        let path = self.path_for::<S>();

        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置: {:?}", path);
            let defaults = S::defaults(self.paths.as_ref());
            self.save(&defaults)?;
            return Ok(defaults);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("无法读取设置文件: {}", e)))?;

        let node: Value = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("设置文件格式错误: {}", e)))?;

        let loaded_version = node
            .get("Version")
            .and_then(Value::as_i64)
            .ok_or_else(|| AppError::Config("设置文件缺少 Version 字段".to_string()))?;

        if loaded_version != i64::from(S::VERSION) {
            tracing::warn!(
                "设置版本不一致: 文件 {}, 当前 {}",
                loaded_version,
                S::VERSION
            );
            let patched = self.patch::<S>(&node)?;
            self.save(&patched)?;
            return Ok(patched);
        }

        validate_fields::<S>(&node)?;

        let settings: S = serde_json::from_value(node)
            .map_err(|e| AppError::Config(format!("设置文件格式错误: {}", e)))?;

        tracing::info!("成功加载设置: {:?}", path);
        Ok(settings)
    }

    /// 保存设置
    pub fn save<S: Settings>(&self, settings: &S) -> AppResult<()> {
        let path = self.path_for::<S>();

        // 序列化为 JSON（格式化输出）
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| AppError::Config(format!("无法序列化设置: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| AppError::Config(format!("无法保存设置文件: {}", e)))?;

        tracing::info!("成功保存设置: {:?}", path);
        Ok(())
    }

    /// 重置为默认设置
    pub fn reset<S: Settings>(&self) -> AppResult<S> {
        let defaults = S::defaults(self.paths.as_ref());
        self.save(&defaults)?;
        Ok(defaults)
    }

    /// 旧版本设置：从默认值出发，保留类型仍然匹配的已声明字段
    fn patch<S: Settings>(&self, loaded: &Value) -> AppResult<S> {
        let defaults = S::defaults(self.paths.as_ref());
        let mut merged = serde_json::to_value(&defaults)
            .map_err(|e| AppError::Config(format!("无法序列化设置: {}", e)))?;

        if let Some(object) = merged.as_object_mut() {
            for field in S::FIELDS.iter().filter(|f| f.name != "Version") {
                match loaded.get(field.name) {
                    Some(value) if field.kind.matches(value) => {
                        object.insert(field.name.to_string(), value.clone());
                    }
                    _ => tracing::warn!("设置字段 {} 无法迁移，使用默认值", field.name),
                }
            }
        }

        let mut settings: S = serde_json::from_value(merged)
            .map_err(|e| AppError::Config(format!("设置文件格式错误: {}", e)))?;
        settings.set_version(S::VERSION);
        Ok(settings)
    }

    /// 配置目录
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }
}

/// 按字段表校验 JSON
fn validate_fields<S: Settings>(node: &Value) -> AppResult<()> {
    for field in S::FIELDS {
        let value = node
            .get(field.name)
            .ok_or_else(|| AppError::Config(format!("缺少设置字段: {}", field.name)))?;

        if !field.kind.matches(value) {
            return Err(AppError::Config(format!(
                "设置字段类型错误: {} 应为 {:?}",
                field.name, field.kind
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreSettings;
    use crate::models::ApplicationSettings;
    use crate::paths::DesktopPathProvider;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn manager(tmp: &TempDir) -> SettingsManager {
        let paths = Arc::new(DesktopPathProvider::with_base_dir(tmp.path().to_path_buf()));
        SettingsManager::new(paths).unwrap()
    }

    #[test]
    fn test_load_missing_writes_defaults() {
        let tmp = TempDir::new().unwrap();
        let manager = manager(&tmp);

        let settings: ApplicationSettings = manager.load().unwrap();

        assert_eq!(settings.version, ApplicationSettings::VERSION);
        assert!(manager.path_for::<ApplicationSettings>().exists());
        assert!(settings.database_path().ends_with("photos.db"));
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = TempDir::new().unwrap();
        let manager = manager(&tmp);

        let settings = ApplicationSettings {
            version: ApplicationSettings::VERSION,
            database_path: tmp.path().join("custom.db").to_string_lossy().into_owned(),
        };
        manager.save(&settings).unwrap();

        let reloaded: ApplicationSettings = manager.load().unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let manager = manager(&tmp);
        fs::write(
            manager.path_for::<ApplicationSettings>(),
            json!({ "Version": 1, "DatabasePath": 12 }).to_string(),
        )
        .unwrap();

        let result: AppResult<ApplicationSettings> = manager.load();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_old_version_is_patched() {
        let tmp = TempDir::new().unwrap();
        let manager = manager(&tmp);
        fs::write(
            manager.path_for::<ApplicationSettings>(),
            json!({ "Version": 0, "DatabasePath": "old.db" }).to_string(),
        )
        .unwrap();

        let settings: ApplicationSettings = manager.load().unwrap();
        assert_eq!(settings.version, ApplicationSettings::VERSION);
        assert_eq!(settings.database_path, "old.db");

        // 修补后的设置已写回
        let content = fs::read_to_string(manager.path_for::<ApplicationSettings>()).unwrap();
        let node: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(node["Version"], json!(ApplicationSettings::VERSION));
    }

    #[test]
    fn test_reset() {
        let tmp = TempDir::new().unwrap();
        let manager = manager(&tmp);
        manager
            .save(&ApplicationSettings {
                version: 1,
                database_path: "elsewhere.db".to_string(),
            })
            .unwrap();

        let settings: ApplicationSettings = manager.reset().unwrap();
        assert!(settings.database_path.ends_with("photos.db"));
    }
}
