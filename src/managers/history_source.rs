//! History sources for historymidi.
//!
//! Implements `HistorySource`, producing the timestamp-ordered list of
//! visits the mapper consumes, either from a browser's SQLite history
//! database via `rusqlite` or from records already in memory.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::database::HistoryDatabase;
use crate::platform;
use crate::types::browser::Browser;
use crate::types::errors::HistorySourceError;
use crate::types::history::HistoryRecord;

/// Chrome stores microseconds since 1601-01-01.
const CHROME_HISTORY_QUERY: &str = "\
    SELECT (visits.visit_time / 1000000) - 11644473600 AS visit_unix_time, \
           urls.url, \
           urls.visit_count \
    FROM urls \
    JOIN visits ON urls.id = visits.url \
    ORDER BY visit_unix_time ASC";

/// Firefox stores microseconds since the Unix epoch.
const FIREFOX_HISTORY_QUERY: &str = "\
    SELECT moz_historyvisits.visit_date / 1000000 AS visit_unix_time, \
           moz_places.url, \
           moz_places.visit_count \
    FROM moz_places \
    JOIN moz_historyvisits ON moz_places.id = moz_historyvisits.place_id \
    ORDER BY visit_unix_time ASC";

/// Trait defining where history records come from.
pub trait HistorySource {
    /// Returns every visit, sorted ascending by timestamp.
    fn fetch_records(&self) -> Result<Vec<HistoryRecord>, HistorySourceError>;
}

/// Returns the query that lists `browser`'s visits in time order.
pub fn history_query(browser: Browser) -> &'static str {
    match browser {
        Browser::Chrome => CHROME_HISTORY_QUERY,
        Browser::Firefox => FIREFOX_HISTORY_QUERY,
    }
}

/// History source backed by a browser's SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteHistorySource {
    browser: Browser,
    path: PathBuf,
}

impl SqliteHistorySource {
    /// Creates a source reading `browser`'s schema from the file at `path`.
    pub fn new<P: Into<PathBuf>>(browser: Browser, path: P) -> Self {
        Self {
            browser,
            path: path.into(),
        }
    }

    /// Creates a source for the current user's default `browser` profile.
    pub fn detect(browser: Browser) -> Result<Self, HistorySourceError> {
        let path = platform::locate_history(browser)?;
        Ok(Self::new(browser, path))
    }

    pub fn browser(&self) -> Browser {
        self.browser
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a single visit row into a record. Missing URLs become empty
    /// strings and missing or negative counts become zero.
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<HistoryRecord> {
        let url: Option<String> = row.get(1)?;
        let visit_count: Option<i64> = row.get(2)?;
        Ok(HistoryRecord {
            timestamp: row.get(0)?,
            url: url.unwrap_or_default(),
            visit_count: visit_count.unwrap_or(0).max(0) as u64,
        })
    }
}

impl HistorySource for SqliteHistorySource {
    /// Snapshots the database and runs the browser-specific visit query.
    /// The snapshot is removed before returning, on success or failure.
    fn fetch_records(&self) -> Result<Vec<HistoryRecord>, HistorySourceError> {
        let db = HistoryDatabase::open_snapshot(&self.path)?;
        let mut stmt = db.connection().prepare(history_query(self.browser))?;
        let rows = stmt.query_map([], Self::row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        info!(
            browser = %self.browser,
            path = %self.path.display(),
            count = records.len(),
            "fetched history records"
        );
        Ok(records)
    }
}

/// History source over records already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistorySource {
    records: Vec<HistoryRecord>,
}

impl MemoryHistorySource {
    pub fn new(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }
}

impl HistorySource for MemoryHistorySource {
    fn fetch_records(&self) -> Result<Vec<HistoryRecord>, HistorySourceError> {
        Ok(self.records.clone())
    }
}
