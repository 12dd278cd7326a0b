use serde::{Deserialize, Serialize};

/// A single visit read from a browser's history database.
///
/// Sources hand these over sorted ascending by `timestamp`; nothing downstream
/// re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub url: String,
    pub visit_count: u64,
}

impl HistoryRecord {
    pub fn new(timestamp: i64, url: impl Into<String>, visit_count: u64) -> Self {
        Self {
            timestamp,
            url: url.into(),
            visit_count,
        }
    }
}

/// The two URL components the mapper cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedUrl {
    /// Network location exactly as written (userinfo and port included).
    pub domain: String,
    /// Hierarchical path without query, fragment or `;params`.
    pub path: String,
}
