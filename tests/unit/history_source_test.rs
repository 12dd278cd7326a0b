//! Integration-level unit tests for SQLite history sources.
//!
//! Builds small Chrome and Firefox shaped databases on disk and reads them
//! back through `SqliteHistorySource`.

use historymidi::managers::history_source::{
    history_query, HistorySource, MemoryHistorySource, SqliteHistorySource,
};
use historymidi::types::browser::Browser;
use historymidi::types::errors::HistorySourceError;
use historymidi::types::history::HistoryRecord;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Seconds between 1601-01-01 and 1970-01-01.
const WINDOWS_EPOCH_OFFSET: i64 = 11_644_473_600;

fn chrome_db(dir: &TempDir, visits: &[(i64, Option<&str>, i64)]) -> PathBuf {
    let path = dir.path().join("History");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE urls (id INTEGER PRIMARY KEY, url TEXT, visit_count INTEGER);
         CREATE TABLE visits (id INTEGER PRIMARY KEY, url INTEGER, visit_time INTEGER);",
    )
    .unwrap();
    for (i, (unix_time, url, count)) in visits.iter().enumerate() {
        let id = i as i64 + 1;
        conn.execute(
            "INSERT INTO urls (id, url, visit_count) VALUES (?1, ?2, ?3)",
            params![id, url, count],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO visits (url, visit_time) VALUES (?1, ?2)",
            params![id, (unix_time + WINDOWS_EPOCH_OFFSET) * 1_000_000 + 123_456],
        )
        .unwrap();
    }
    path
}

fn firefox_db(dir: &Path, visits: &[(i64, &str, i64)]) -> PathBuf {
    let path = dir.join("places.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url TEXT, visit_count INTEGER);
         CREATE TABLE moz_historyvisits (id INTEGER PRIMARY KEY, place_id INTEGER, visit_date INTEGER);",
    )
    .unwrap();
    for (i, (unix_time, url, count)) in visits.iter().enumerate() {
        let id = i as i64 + 1;
        conn.execute(
            "INSERT INTO moz_places (id, url, visit_count) VALUES (?1, ?2, ?3)",
            params![id, url, count],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO moz_historyvisits (place_id, visit_date) VALUES (?1, ?2)",
            params![id, unix_time * 1_000_000 + 999_999],
        )
        .unwrap();
    }
    path
}

#[test]
fn test_chrome_records_converted_and_sorted() {
    let dir = TempDir::new().unwrap();
    let path = chrome_db(
        &dir,
        &[
            (1_700_000_100, Some("https://b.com/"), 2),
            (1_700_000_000, Some("https://a.com/x"), 5),
        ],
    );

    let records = SqliteHistorySource::new(Browser::Chrome, &path)
        .fetch_records()
        .unwrap();

    assert_eq!(
        records,
        vec![
            HistoryRecord::new(1_700_000_000, "https://a.com/x", 5),
            HistoryRecord::new(1_700_000_100, "https://b.com/", 2),
        ]
    );
}

#[test]
fn test_chrome_null_url_and_negative_count() {
    let dir = TempDir::new().unwrap();
    let path = chrome_db(&dir, &[(1_000, None, -3)]);

    let records = SqliteHistorySource::new(Browser::Chrome, &path)
        .fetch_records()
        .unwrap();

    assert_eq!(records, vec![HistoryRecord::new(1_000, "", 0)]);
}

#[test]
fn test_firefox_records_converted_and_sorted() {
    let dir = TempDir::new().unwrap();
    let path = firefox_db(
        dir.path(),
        &[
            (300, "https://c.org/", 1),
            (100, "https://a.org/", 7),
            (200, "https://b.org/", 3),
        ],
    );

    let records = SqliteHistorySource::new(Browser::Firefox, &path)
        .fetch_records()
        .unwrap();

    let timestamps: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
    assert_eq!(timestamps, vec![100, 200, 300]);
    assert_eq!(records[0].url, "https://a.org/");
    assert_eq!(records[0].visit_count, 7);
}

#[test]
fn test_original_file_left_untouched() {
    let dir = TempDir::new().unwrap();
    let path = chrome_db(&dir, &[(1, Some("https://a.com/"), 1)]);
    let before = std::fs::read(&path).unwrap();

    SqliteHistorySource::new(Browser::Chrome, &path)
        .fetch_records()
        .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_missing_database_is_not_found() {
    let dir = TempDir::new().unwrap();
    let source = SqliteHistorySource::new(Browser::Chrome, dir.path().join("History"));
    assert!(matches!(
        source.fetch_records(),
        Err(HistorySourceError::NotFound(_))
    ));
}

#[test]
fn test_wrong_schema_is_database_error() {
    let dir = TempDir::new().unwrap();
    // A Firefox database read with the Chrome query.
    let path = firefox_db(dir.path(), &[(1, "https://a.org/", 1)]);
    let source = SqliteHistorySource::new(Browser::Chrome, &path);
    assert!(matches!(
        source.fetch_records(),
        Err(HistorySourceError::Database(_))
    ));
}

#[test]
fn test_queries_target_browser_tables() {
    assert!(history_query(Browser::Chrome).contains("FROM urls"));
    assert!(history_query(Browser::Firefox).contains("FROM moz_places"));
}

#[test]
fn test_memory_source_returns_records() {
    let records = vec![HistoryRecord::new(1, "https://a.com/", 1)];
    let source = MemoryHistorySource::new(records.clone());
    assert_eq!(source.fetch_records().unwrap(), records);
}
