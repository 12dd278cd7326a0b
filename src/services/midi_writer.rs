// MIDI output from arrangements.
//
// Converts an Arrangement into a Standard MIDI File (SMF), Format 1
// (multi-track). Track 0 carries the tempo; each voice follows as its own
// named track ("Voice 1", "Voice 2", ...). All notes sit on channel 0 and
// beats map to ticks at TICKS_PER_QUARTER.
//
// Uses the `midly` crate for MIDI writing.

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::types::config::MAX_VOICE_COUNT;
use crate::types::errors::MidiWriteError;
use crate::types::note::{Arrangement, NoteEvent};

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 960;

const CHANNEL: u8 = 0;

/// Largest delta a single track event can carry.
const MAX_DELTA: u64 = (1 << 28) - 1;

/// Latest tick a note may end on. Keeps the number of gap-bridging events
/// per track bounded (at most 2^16).
pub const MAX_TICK: u64 = MAX_DELTA << 16;

/// Largest tempo value (microseconds per quarter) the tempo meta event holds.
const MAX_TEMPO_MICROS: u32 = (1 << 24) - 1;

/// Convert an Arrangement to MIDI and write it to a file.
pub fn write_midi(arrangement: &Arrangement, path: &Path) -> Result<(), MidiWriteError> {
    let bytes = encode_midi(arrangement)?;
    fs::write(path, &bytes).map_err(|e| {
        MidiWriteError::Io(format!("Failed to write {}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote MIDI file");
    Ok(())
}

/// Convert an Arrangement to the bytes of a Standard MIDI File.
pub fn encode_midi(arrangement: &Arrangement) -> Result<Vec<u8>, MidiWriteError> {
    if arrangement.voice_count() > MAX_VOICE_COUNT {
        return Err(MidiWriteError::TooManyVoices(arrangement.voice_count()));
    }

    let names: Vec<String> = (1..=arrangement.voice_count())
        .map(|n| format!("Voice {}", n))
        .collect();

    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));
    smf.tracks.push(tempo_track(arrangement.bpm));
    for (voice, name) in arrangement.voices.iter().zip(&names) {
        smf.tracks.push(voice_track(name, voice)?);
    }

    let mut buf = Vec::new();
    smf.write_std(&mut buf)
        .map_err(|e| MidiWriteError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Microseconds per quarter note for `bpm`, clamped to what MIDI can store.
pub fn tempo_micros(bpm: u32) -> u32 {
    (60_000_000 / bpm.max(1)).min(MAX_TEMPO_MICROS)
}

/// Converts a position in beats to ticks, rounding to the nearest tick.
pub fn beats_to_ticks(beats: f64) -> u64 {
    (beats.max(0.0) * f64::from(TICKS_PER_QUARTER)).round() as u64
}

fn tempo_track(bpm: u32) -> Track<'static> {
    vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_micros(bpm)))),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ]
}

/// A note boundary at an absolute tick. Offs sort before ons at the same
/// tick so back-to-back notes of one pitch do not swallow each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Boundary {
    tick: u64,
    is_on: bool,
    key: u8,
    vel: u8,
}

impl Boundary {
    fn off(tick: u64, key: u8) -> Self {
        Self {
            tick,
            is_on: false,
            key,
            vel: 0,
        }
    }
}

fn boundaries(notes: &[NoteEvent]) -> Result<Vec<Boundary>, MidiWriteError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        let start = beats_to_ticks(note.start_time);
        let end = start.saturating_add(beats_to_ticks(note.duration).max(1));
        if end > MAX_TICK {
            return Err(MidiWriteError::TimelineTooLong(note.start_time));
        }
        // Identical notes on one track are written once.
        if !seen.insert((note.pitch, start, end, note.velocity)) {
            continue;
        }
        let key = note.pitch.min(127);
        out.push(Boundary {
            tick: start,
            is_on: true,
            key,
            vel: note.velocity.min(127),
        });
        out.push(Boundary::off(end, key));
    }
    out.sort();
    Ok(deinterleave(out))
}

/// Rewrites overlapping notes of one key so that at most one is sounding.
///
/// A note-on for a key that is already sounding first ends the sounding note
/// at the same tick. The off belonging to that earlier note is then dropped,
/// and the key is released by the last pending off.
fn deinterleave(sorted: Vec<Boundary>) -> Vec<Boundary> {
    let mut pending = [0usize; 128];
    let mut out = Vec::with_capacity(sorted.len());
    for boundary in sorted {
        let depth = &mut pending[usize::from(boundary.key)];
        if boundary.is_on {
            if *depth > 0 {
                out.push(Boundary::off(boundary.tick, boundary.key));
            }
            *depth += 1;
            out.push(boundary);
        } else {
            match *depth {
                0 => {}
                1 => {
                    *depth = 0;
                    out.push(boundary);
                }
                _ => *depth -= 1,
            }
        }
    }
    out
}

fn voice_track<'a>(name: &'a str, notes: &[NoteEvent]) -> Result<Track<'a>, MidiWriteError> {
    let mut track: Track<'a> = vec![TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
    }];

    let channel = u4::new(CHANNEL);
    let mut last_tick = 0u64;
    for boundary in boundaries(notes)? {
        let mut delta = boundary.tick - last_tick;
        // Gaps longer than one delta can hold are bridged with empty text
        // events.
        while delta > MAX_DELTA {
            track.push(TrackEvent {
                delta: u28::new(MAX_DELTA as u32),
                kind: TrackEventKind::Meta(MetaMessage::Text(b"")),
            });
            delta -= MAX_DELTA;
        }
        let message = if boundary.is_on {
            MidiMessage::NoteOn {
                key: u7::new(boundary.key),
                vel: u7::new(boundary.vel),
            }
        } else {
            MidiMessage::NoteOff {
                key: u7::new(boundary.key),
                vel: u7::new(0),
            }
        };
        track.push(TrackEvent {
            delta: u28::new(delta as u32),
            kind: TrackEventKind::Midi { channel, message },
        });
        last_tick = boundary.tick;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    Ok(track)
}
