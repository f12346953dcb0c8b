//! PhotoLibrary Core Library
//!
//! This crate provides the core logic for PhotoLibrary, a desktop photo
//! manager that groups pictures into events. It is frontend-agnostic: the
//! UI layer talks to the store through the [`FileStore`] trait.
//!
//! # Architecture
//!
//! - `models`: Data structures (FileRecord, EventRecord, settings)
//! - `db`: SQLite file/event store with batched membership operations
//! - `services`: Settings persistence and file import
//! - `paths`: Path provider abstraction (PathProvider trait)
//! - `utils`: Error handling
//!
//! # Example
//!
//! ```no_run
//! use photolib_core::{DesktopPathProvider, PhotoLibraryCore};
//! use std::sync::Arc;
//!
//! let mut core = PhotoLibraryCore::new(Arc::new(DesktopPathProvider::new())).unwrap();
//! let event_id = core.store().add_event("Vacation2024").unwrap();
//! core.shutdown().unwrap();
//! # let _ = event_id;
//! ```

pub mod db;
pub mod models;
pub mod paths;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use db::{DatabaseStats, FileDb, FileStore, StoreSettings, StoreStatus};
pub use models::{ApplicationSettings, EventRecord, FileRecord, Membership, NewFile};
pub use paths::{DesktopPathProvider, PathProvider, SharedPathProvider};
pub use services::{ImportOptions, ImportResult, Importer, SettingsManager};
pub use utils::{AppError, AppResult};

use std::sync::Arc;

/// PhotoLibrary core application context.
///
/// Built once by the entry point; every collaborator is passed in
/// explicitly rather than looked up from global state.
pub struct PhotoLibraryCore {
    /// Path provider for resolving application paths
    pub path_provider: SharedPathProvider,
    /// Settings manager
    pub settings_manager: SettingsManager,
    /// Loaded application settings
    pub settings: Arc<ApplicationSettings>,
    /// File/event store
    pub db: FileDb,
}

impl PhotoLibraryCore {
    /// Load settings and open the store.
    pub fn new(path_provider: SharedPathProvider) -> AppResult<Self> {
        let settings_manager = SettingsManager::new(path_provider.clone())?;
        let settings: Arc<ApplicationSettings> = Arc::new(settings_manager.load()?);

        tracing::info!("数据库路径: {}", settings.database_path);

        let mut db = FileDb::new(settings.clone());
        db.init()?;

        Ok(Self {
            path_provider,
            settings_manager,
            settings,
            db,
        })
    }

    /// Get the store.
    pub fn store(&self) -> &FileDb {
        &self.db
    }

    /// Get the path provider reference.
    pub fn paths(&self) -> &SharedPathProvider {
        &self.path_provider
    }

    /// Import a directory into the store.
    pub fn import_directory(
        &self,
        path: &std::path::Path,
        options: ImportOptions,
    ) -> AppResult<ImportResult> {
        Importer::new(&self.db, options).import_directory(path)
    }

    /// Close the store.
    pub fn shutdown(&mut self) -> AppResult<()> {
        self.db.deinit()
    }
}
