//! Path provider abstraction.
//!
//! Resolves the well-known application folders so that settings, logs and
//! the database can be located without any process-wide lookup.

use std::path::PathBuf;
use std::sync::Arc;

/// Name of the per-user application folder.
pub const APPLICATION_FOLDER_NAME: &str = "PhotoLibrary";

/// Name of the configuration folder below the application folder.
pub const CONFIG_FOLDER_NAME: &str = "conf";

/// Default database file name.
pub const DATABASE_FILE_NAME: &str = "photos.db";

/// Trait for providing application data paths.
pub trait PathProvider: Send + Sync {
    /// Get the root application data directory.
    fn app_data_dir(&self) -> PathBuf;

    /// Get the user's pictures directory.
    fn pictures_dir(&self) -> PathBuf;

    /// Get the configuration directory.
    fn config_dir(&self) -> PathBuf {
        self.app_data_dir().join(CONFIG_FOLDER_NAME)
    }

    /// Get the logs directory.
    fn logs_dir(&self) -> PathBuf {
        self.app_data_dir().join("Logs")
    }

    /// Default database location, inside the pictures directory so that
    /// the library travels with the photos.
    fn default_database_path(&self) -> PathBuf {
        self.pictures_dir()
            .join(APPLICATION_FOLDER_NAME)
            .join(DATABASE_FILE_NAME)
    }
}

/// Shared reference to a PathProvider implementation.
pub type SharedPathProvider = Arc<dyn PathProvider>;

/// Desktop path provider.
///
/// Uses `%APPDATA%/PhotoLibrary/` for application data and the user's
/// "My Pictures" folder for the library on Windows.
#[derive(Debug, Clone)]
pub struct DesktopPathProvider {
    app_data_dir: PathBuf,
    pictures_dir: PathBuf,
}

impl DesktopPathProvider {
    pub fn new() -> Self {
        let app_data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APPLICATION_FOLDER_NAME);
        let pictures_dir = dirs::picture_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            app_data_dir,
            pictures_dir,
        }
    }

    /// Create a provider rooted at a custom base directory.
    ///
    /// Useful for testing.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            app_data_dir: base_dir.join(APPLICATION_FOLDER_NAME),
            pictures_dir: base_dir.join("Pictures"),
        }
    }
}

impl Default for DesktopPathProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PathProvider for DesktopPathProvider {
    fn app_data_dir(&self) -> PathBuf {
        self.app_data_dir.clone()
    }

    fn pictures_dir(&self) -> PathBuf {
        self.pictures_dir.clone()
    }
}
