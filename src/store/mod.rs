//! Per-user health record history.
//!
//! The store owns the append-only record sequence for one user and
//! derives bounded, chronologically ordered trend series from it. It
//! persists through an abstract key-value port so the same core works
//! against an in-memory map, local files, or SQLite without change.

pub mod file;
pub mod health_store;
pub mod memory;
pub mod persistence;
pub mod sqlite;

pub use file::FileStorage;
pub use health_store::{HealthRecordStore, LoadReport, DEFAULT_WINDOW};
pub use memory::MemoryStorage;
pub use persistence::{record_key, StoragePort};
pub use sqlite::SqliteStorage;

use thiserror::Error;

/// Failures raised by a persistence adapter.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Failures surfaced by the record store itself.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The persistence port failed; the affected record is retained in
    /// the in-memory view so a later `flush` can retry the save.
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),

    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
