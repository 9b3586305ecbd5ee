use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{Result, StoreError};
use crate::snapshot::{FileCounts, Snapshot};

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp INTEGER NOT NULL,
            files TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Database handle. Open once at startup, pass it around, drop it at exit.
pub struct Store {
    conn: Connection,
    excluded: Option<String>,
}

impl Store {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        debug!(path = %path.display(), "opened snapshot database");
        Ok(Store { conn, excluded: None })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store { conn, excluded: None })
    }

    /// Hide `name` from every snapshot read back from the database,
    /// including the one new scans are compared against.
    pub fn excluding(mut self, name: impl Into<String>) -> Self {
        self.excluded = Some(name.into());
        self
    }

    /// Store `files` as a new snapshot unless it equals the latest one.
    ///
    /// Returns the stored snapshot, or `None` when nothing changed. The
    /// comparison and the insert share one transaction. Timestamps never go
    /// backwards: a clock earlier than the latest row is clamped to it.
    pub fn append_if_changed(
        &mut self,
        files: &FileCounts,
        timestamp: i64,
    ) -> Result<Option<Snapshot>> {
        let tx = self.conn.transaction()?;

        let latest = latest_row(&tx, self.excluded.as_deref())?;
        if latest.as_ref().is_some_and(|s| &s.files == files) {
            debug!(files = files.len(), "counts unchanged, no snapshot stored");
            tx.commit()?;
            return Ok(None);
        }

        let timestamp = latest.map_or(timestamp, |s| timestamp.max(s.timestamp));
        let encoded = serde_json::to_string(files)?;

        tx.execute(
            "INSERT INTO snapshots (timestamp, files) VALUES (?1, ?2)",
            params![timestamp, encoded],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(id, files = files.len(), "stored new snapshot");

        Ok(Some(Snapshot {
            id,
            timestamp,
            files: files.clone(),
        }))
    }

    /// All snapshots, oldest first
    pub fn list_all(&self) -> Result<Vec<Snapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, files
             FROM snapshots
             ORDER BY timestamp ASC, id ASC",
        )?;

        let rows = stmt
            .query_map([], raw_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|raw| decode(raw, self.excluded.as_deref()))
            .collect()
    }

    /// Get the most recent snapshot
    pub fn latest(&self) -> Result<Option<Snapshot>> {
        latest_row(&self.conn, self.excluded.as_deref())
    }
}

struct RawRow {
    id: i64,
    timestamp: i64,
    files: String,
}

fn raw_from_row(row: &rusqlite::Row) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        files: row.get(2)?,
    })
}

fn decode(raw: RawRow, excluded: Option<&str>) -> Result<Snapshot> {
    let files: FileCounts = serde_json::from_str(&raw.files)
        .map_err(|source| StoreError::Decode { id: raw.id, source })?;

    let snapshot = Snapshot {
        id: raw.id,
        timestamp: raw.timestamp,
        files,
    };

    Ok(match excluded {
        Some(name) => snapshot.without_file(name),
        None => snapshot,
    })
}

fn latest_row(conn: &Connection, excluded: Option<&str>) -> Result<Option<Snapshot>> {
    let raw = conn
        .query_row(
            "SELECT id, timestamp, files
             FROM snapshots
             ORDER BY timestamp DESC, id DESC
             LIMIT 1",
            [],
            raw_from_row,
        )
        .optional()?;

    raw.map(|r| decode(r, excluded)).transpose()
}
