//! Event Mapper: turns time-ordered history records into per-voice notes.
//!
//! Each valid record becomes exactly one [`NoteEvent`]:
//! - the domain's stable hash picks the voice and a base note in the lower
//!   half of the pitch range, and the path length shifts it chromatically;
//! - the start is the record's offset from the first record, in seconds used
//!   directly as beats. Tempo does not scale it, which is a known oddity of
//!   the output format;
//! - the duration is the gap since the previous *valid* record, compressed
//!   so a 10 second gap is a whole note;
//! - the velocity grows with the visit count relative to the busiest URL.
//!
//! Records whose URL does not parse are skipped and do not move the
//! previous-timestamp cursor.

use tracing::{debug, info};

use crate::services::normalizer::normalize;
use crate::services::stable_hash::stable_hash;
use crate::types::config::MappingConfig;
use crate::types::errors::ConfigError;
use crate::types::history::{HistoryRecord, ParsedUrl};
use crate::types::note::{Arrangement, NoteEvent};

/// Seconds of browsing gap that make one beat of note length.
pub const SECONDS_PER_BEAT: f64 = 2.5;
/// Shortest note, a sixteenth.
pub const MIN_DURATION: f64 = 0.25;
/// Longest note, a whole note.
pub const MAX_DURATION: f64 = 4.0;
/// Path lengths shift the base note within one octave.
const PATH_SHIFT_MODULUS: usize = 12;

/// Trait defining the record-to-notes mapping.
pub trait EventMapperTrait {
    fn map_records(&self, records: &[HistoryRecord]) -> Arrangement;
    fn config(&self) -> &MappingConfig;
}

/// Values fixed for a whole mapping pass.
struct RunContext {
    first_timestamp: i64,
    max_visit_count: u64,
}

/// Maps history records to notes using a validated [`MappingConfig`].
#[derive(Debug, Clone)]
pub struct EventMapper {
    config: MappingConfig,
}

impl EventMapper {
    /// Creates a mapper after validating `config`.
    pub fn new(config: MappingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn voice_for(&self, domain_hash: u64) -> usize {
        (domain_hash % self.config.voice_count as u64) as usize
    }

    fn pitch_for(&self, domain_hash: u64, path: &str) -> u8 {
        let (low, high) = self.config.pitch_range;
        let half_range = u64::from(high - low) / 2;
        let base_note = u64::from(low)
            + if half_range > 0 {
                domain_hash % half_range
            } else {
                0
            };
        let path_shift = (path.chars().count() % PATH_SHIFT_MODULUS) as u64;
        (base_note + path_shift).clamp(u64::from(low), u64::from(high)) as u8
    }

    fn velocity_for(&self, visit_count: u64, max_visit_count: u64) -> u8 {
        let normalized = visit_count as f64 / max_visit_count as f64;
        let velocity = f64::from(self.config.velocity_base)
            + normalized * f64::from(self.config.velocity_modulation);
        velocity.round().clamp(0.0, 127.0) as u8
    }

    fn note_for(
        &self,
        record: &HistoryRecord,
        url: &ParsedUrl,
        ctx: &RunContext,
        last_processed: Option<i64>,
    ) -> NoteEvent {
        let domain_hash = stable_hash(&url.domain);
        let time_delta = last_processed.map_or(0, |last| record.timestamp.saturating_sub(last));
        let start_time = record.timestamp.saturating_sub(ctx.first_timestamp) as f64;

        NoteEvent {
            voice: self.voice_for(domain_hash),
            pitch: self.pitch_for(domain_hash, &url.path),
            start_time,
            duration: (time_delta as f64 / SECONDS_PER_BEAT).clamp(MIN_DURATION, MAX_DURATION),
            velocity: self.velocity_for(record.visit_count, ctx.max_visit_count),
        }
    }
}

impl EventMapperTrait for EventMapper {
    /// Maps `records` (sorted ascending by timestamp) into an arrangement.
    ///
    /// An empty input, or one where every URL is malformed, yields an
    /// arrangement with `voice_count` empty voices.
    fn map_records(&self, records: &[HistoryRecord]) -> Arrangement {
        let mut arrangement = Arrangement::empty(self.config.voice_count, self.config.bpm);

        let Some(first) = records.first() else {
            info!("No history records to map");
            return arrangement;
        };

        // The origin is the first record even if its URL turns out malformed.
        let ctx = RunContext {
            first_timestamp: first.timestamp,
            max_visit_count: records
                .iter()
                .map(|r| r.visit_count)
                .max()
                .unwrap_or(0)
                .max(1),
        };

        let mut skipped = 0usize;
        records.iter().fold(None, |last_processed, record| {
            match normalize(&record.url) {
                Ok(url) => {
                    let note = self.note_for(record, &url, &ctx, last_processed);
                    arrangement.voices[note.voice].push(note);
                    Some(record.timestamp)
                }
                Err(err) => {
                    debug!(timestamp = record.timestamp, "skipping record: {}", err);
                    skipped += 1;
                    last_processed
                }
            }
        });

        info!(
            records = records.len(),
            notes = arrangement.event_count(),
            skipped,
            "mapped history records"
        );
        arrangement
    }

    fn config(&self) -> &MappingConfig {
        &self.config
    }
}
