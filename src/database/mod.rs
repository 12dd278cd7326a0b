//! historymidi database layer.
//!
//! Opens a private snapshot of a browser's SQLite history database so the
//! browser can keep its own lock on the original while we read.
//!
//! # Usage
//!
//! ```no_run
//! use historymidi::database::HistoryDatabase;
//!
//! let db = HistoryDatabase::open_snapshot("/path/to/places.sqlite")
//!     .expect("failed to snapshot history");
//! let conn = db.connection();
//! ```

pub mod connection;

pub use connection::HistoryDatabase;
