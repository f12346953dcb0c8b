//! PhotoLibrary 服务模块
//!
//! 包含设置管理与文件导入服务

pub mod device_entry;
pub mod hasher;
pub mod importer;
pub mod scanner;
pub mod settings;

// 重新导出常用类型
pub use device_entry::DeviceEntry;
pub use hasher::FileHasher;
pub use importer::{ImportOptions, ImportResult, Importer};
pub use scanner::{is_image_file, ScanOptions, ScanResult, Scanner, SUPPORTED_FORMATS};
pub use settings::SettingsManager;
