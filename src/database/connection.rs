//! SQLite snapshot management for browser history databases.
//!
//! Provides the [`HistoryDatabase`] struct that copies a live history
//! database into a temporary directory and wraps a `rusqlite::Connection`
//! to the copy.

use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::types::errors::HistorySourceError;

/// File name of the copy inside the snapshot directory.
const SNAPSHOT_FILE: &str = "history.sqlite";

/// SQLite sidecar files that can hold visits not yet checkpointed into the
/// main database file.
const SIDECAR_SUFFIXES: [&str; 2] = ["-wal", "-journal"];

/// A read-only view of a browser history database via a private copy.
///
/// Browsers keep their history database locked while running, so the file is
/// copied first. The copy lives in a temporary directory that is removed
/// when the `HistoryDatabase` is dropped.
pub struct HistoryDatabase {
    // Declared before `snapshot` so the connection closes before the
    // directory is deleted.
    conn: Connection,
    snapshot: TempDir,
}

impl HistoryDatabase {
    /// Copies the database at `path` (and any sidecar files) into a fresh
    /// temporary directory and opens the copy.
    ///
    /// # Errors
    /// - `NotFound` if `path` does not exist.
    /// - `Io` if the temporary directory or the copy cannot be created.
    /// - `Database` if SQLite cannot open the copy read-only.
    pub fn open_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, HistorySourceError> {
        let source = path.as_ref();
        if !source.is_file() {
            return Err(HistorySourceError::NotFound(source.display().to_string()));
        }

        let snapshot = tempfile::Builder::new()
            .prefix("historymidi-")
            .tempdir()
            .map_err(|e| {
                HistorySourceError::Io(format!("Failed to create snapshot directory: {}", e))
            })?;
        let copy = snapshot.path().join(SNAPSHOT_FILE);

        fs::copy(source, &copy).map_err(|e| {
            HistorySourceError::Io(format!("Failed to copy {}: {}", source.display(), e))
        })?;
        for suffix in SIDECAR_SUFFIXES {
            let sidecar = sidecar_path(source, suffix);
            if sidecar.is_file() {
                fs::copy(&sidecar, sidecar_path(&copy, suffix)).map_err(|e| {
                    HistorySourceError::Io(format!("Failed to copy {}: {}", sidecar.display(), e))
                })?;
            }
        }
        debug!(source = %source.display(), copy = %copy.display(), "snapshotted history database");

        let conn = Connection::open_with_flags(
            &copy,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn, snapshot })
    }

    /// Returns a reference to the connection to the snapshot.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Directory holding the snapshot; removed on drop.
    pub fn snapshot_dir(&self) -> &Path {
        self.snapshot.path()
    }
}

fn sidecar_path(db: &Path, suffix: &str) -> PathBuf {
    let mut name = db.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
