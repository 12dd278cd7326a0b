//! App Core for historymidi.
//!
//! Wires a history source, the event mapper and the MIDI writer into one
//! history-to-MIDI run.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::managers::history_source::{HistorySource, SqliteHistorySource};
use crate::services::event_mapper::{EventMapper, EventMapperTrait};
use crate::services::midi_writer::write_midi;
use crate::types::browser::Browser;
use crate::types::config::MappingConfig;
use crate::types::errors::{AppError, HistorySourceError};
use crate::types::history::HistoryRecord;
use crate::types::note::Arrangement;

/// Default output file name.
pub const OUTPUT_FILENAME: &str = "browser_history.mid";

/// What one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub records_read: usize,
    pub notes_written: usize,
    /// Records dropped because their URL did not parse.
    pub records_skipped: usize,
    pub output_path: PathBuf,
}

impl RunSummary {
    /// True when no record produced a note.
    pub fn is_empty(&self) -> bool {
        self.notes_written == 0
    }
}

/// Central application struct holding the configured mapper.
pub struct App {
    mapper: EventMapper,
}

impl App {
    /// Creates a new App after validating `config`.
    pub fn new(config: MappingConfig) -> Result<Self, AppError> {
        Ok(Self {
            mapper: EventMapper::new(config)?,
        })
    }

    pub fn config(&self) -> &MappingConfig {
        self.mapper.config()
    }

    /// Builds the SQLite source for `browser`, reading `history_db` when
    /// given and the browser's default profile otherwise.
    pub fn history_source(
        browser: Browser,
        history_db: Option<&Path>,
    ) -> Result<SqliteHistorySource, HistorySourceError> {
        match history_db {
            Some(path) => Ok(SqliteHistorySource::new(browser, path)),
            None => SqliteHistorySource::detect(browser),
        }
    }

    /// Maps already-fetched records without writing anything.
    pub fn compose(&self, records: &[HistoryRecord]) -> Arrangement {
        self.mapper.map_records(records)
    }

    /// Fetches records from `source`, maps them and writes the MIDI file to
    /// `output`.
    ///
    /// An empty history is not an error: the file is still written (it holds
    /// only the track headers) and the summary reports zero notes.
    pub fn run<S: HistorySource>(
        &self,
        source: &S,
        output: &Path,
    ) -> Result<RunSummary, AppError> {
        let records = source.fetch_records()?;
        self.render(&records, output)
    }

    /// Maps already-fetched `records` and writes the MIDI file to `output`.
    pub fn render(
        &self,
        records: &[HistoryRecord],
        output: &Path,
    ) -> Result<RunSummary, AppError> {
        let arrangement = self.compose(records);
        write_midi(&arrangement, output)?;

        let summary = RunSummary {
            records_read: records.len(),
            notes_written: arrangement.event_count(),
            records_skipped: records.len() - arrangement.event_count(),
            output_path: output.to_path_buf(),
        };
        info!(
            records = summary.records_read,
            notes = summary.notes_written,
            output = %output.display(),
            "history run complete"
        );
        Ok(summary)
    }
}
