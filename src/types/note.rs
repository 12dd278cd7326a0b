use serde::{Deserialize, Serialize};

/// One note produced from one history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub voice: usize,
    /// MIDI note number.
    pub pitch: u8,
    /// Position in beats from the first record.
    pub start_time: f64,
    /// Length in beats.
    pub duration: f64,
    pub velocity: u8,
}

/// The mapper's output: one ordered note list per voice plus the tempo a
/// player should render the beats at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    pub bpm: u32,
    pub voices: Vec<Vec<NoteEvent>>,
}

impl Arrangement {
    /// Creates an arrangement with `voice_count` empty voices.
    pub fn empty(voice_count: usize, bpm: u32) -> Self {
        Self {
            bpm,
            voices: vec![Vec::new(); voice_count],
        }
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Total number of notes across all voices.
    pub fn event_count(&self) -> usize {
        self.voices.iter().map(Vec::len).sum()
    }

    /// True when no record produced a note. Callers use this to report
    /// "nothing to process" instead of silently writing an empty file.
    pub fn is_empty(&self) -> bool {
        self.voices.iter().all(Vec::is_empty)
    }

    /// All notes in voice order, each voice in its own insertion order.
    pub fn iter_events(&self) -> impl Iterator<Item = &NoteEvent> {
        self.voices.iter().flatten()
    }
}
