//! SQLite snapshot storage.
//!
//! Persists scan results to a local SQLite database with one table:
//! - snapshots: id, timestamp, files (per-file counts as json)
//!
//! Supports:
//! - Appending a snapshot only when the counts changed
//! - Listing all snapshots oldest first
//! - Computing per-file deltas between consecutive snapshots

pub mod diff;
pub mod snapshot;

pub use snapshot::Store;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("malformed file counts in snapshot {id}: {source}")]
    Decode {
        id: i64,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode file counts: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
