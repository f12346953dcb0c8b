//! Narrow store interface used by frontends and services.

use crate::models::{EventRecord, FileRecord, NewFile};
use crate::utils::error::AppResult;

use super::connection::FileDb;

/// Operations offered by the file/event store.
///
/// All operations other than `init`/`deinit` fail with
/// [`AppError::NotInitialized`](crate::AppError::NotInitialized) while the
/// store is not open.
pub trait FileStore {
    fn init(&mut self) -> AppResult<()>;
    fn deinit(&mut self) -> AppResult<()>;

    fn add_event(&self, name: &str) -> AppResult<i64>;
    /// Returns `None` when no event has the given id.
    fn get_event(&self, event_id: i64) -> AppResult<Option<EventRecord>>;
    fn delete_event(&self, event_id: i64) -> AppResult<()>;
    fn delete_events(&self, event_ids: &[i64]) -> AppResult<()>;
    fn get_all_events(&self) -> AppResult<Vec<EventRecord>>;

    /// Inserts the file and links it to every event in `event_ids`, atomically.
    fn add_file(&self, file: &NewFile, event_ids: &[i64]) -> AppResult<i64>;
    fn assign_file_to_event(&self, file_id: i64, event_id: i64) -> AppResult<usize>;
    fn assign_files_to_event(&self, file_ids: &[i64], event_id: i64) -> AppResult<usize>;
    fn delete_file_from_event(&self, file_id: i64, event_id: i64) -> AppResult<usize>;
    fn delete_files_from_event(&self, file_ids: &[i64], event_id: i64) -> AppResult<usize>;
    fn delete_file(&self, file_id: i64) -> AppResult<()>;
    fn delete_files(&self, file_ids: &[i64]) -> AppResult<()>;
    fn get_files_by_event_id(&self, event_id: i64) -> AppResult<Vec<FileRecord>>;
    fn get_all_files(&self) -> AppResult<Vec<FileRecord>>;
}

impl FileStore for FileDb {
    fn init(&mut self) -> AppResult<()> {
        FileDb::init(self)
    }

    fn deinit(&mut self) -> AppResult<()> {
        FileDb::deinit(self)
    }

    fn add_event(&self, name: &str) -> AppResult<i64> {
        FileDb::add_event(self, name)
    }

    fn get_event(&self, event_id: i64) -> AppResult<Option<EventRecord>> {
        FileDb::get_event(self, event_id)
    }

    fn delete_event(&self, event_id: i64) -> AppResult<()> {
        FileDb::delete_event(self, event_id)
    }

    fn delete_events(&self, event_ids: &[i64]) -> AppResult<()> {
        FileDb::delete_events(self, event_ids)
    }

    fn get_all_events(&self) -> AppResult<Vec<EventRecord>> {
        FileDb::get_all_events(self)
    }

    fn add_file(&self, file: &NewFile, event_ids: &[i64]) -> AppResult<i64> {
        FileDb::add_file(self, file, event_ids)
    }

    fn assign_file_to_event(&self, file_id: i64, event_id: i64) -> AppResult<usize> {
        FileDb::assign_file_to_event(self, file_id, event_id)
    }

    fn assign_files_to_event(&self, file_ids: &[i64], event_id: i64) -> AppResult<usize> {
        FileDb::assign_files_to_event(self, file_ids, event_id)
    }

    fn delete_file_from_event(&self, file_id: i64, event_id: i64) -> AppResult<usize> {
        FileDb::delete_file_from_event(self, file_id, event_id)
    }

    fn delete_files_from_event(&self, file_ids: &[i64], event_id: i64) -> AppResult<usize> {
        FileDb::delete_files_from_event(self, file_ids, event_id)
    }

    fn delete_file(&self, file_id: i64) -> AppResult<()> {
        FileDb::delete_file(self, file_id)
    }

    fn delete_files(&self, file_ids: &[i64]) -> AppResult<()> {
        FileDb::delete_files(self, file_ids)
    }

    fn get_files_by_event_id(&self, event_id: i64) -> AppResult<Vec<FileRecord>> {
        FileDb::get_files_by_event_id(self, event_id)
    }

    fn get_all_files(&self) -> AppResult<Vec<FileRecord>> {
        FileDb::get_all_files(self)
    }
}
