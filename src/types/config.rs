use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// MIDI note numbers C3 to C6.
pub const DEFAULT_PITCH_RANGE: (u8, u8) = (48, 84);
pub const DEFAULT_BPM: u32 = 120;
pub const DEFAULT_VELOCITY_BASE: u8 = 80;
/// How much the visit count can add on top of the base velocity.
pub const DEFAULT_VELOCITY_MODULATION: u8 = 20;
pub const DEFAULT_VOICE_COUNT: usize = 4;
/// One MIDI channel per voice is the most a player can tell apart.
pub const MAX_VOICE_COUNT: usize = 16;

/// Parameters of the history-to-notes mapping.
///
/// Missing fields in a config file fall back to their defaults, so a file
/// containing only `{"bpm": 90}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Inclusive `(low, high)` MIDI note bounds.
    pub pitch_range: (u8, u8),
    pub velocity_base: u8,
    pub velocity_modulation: u8,
    pub voice_count: usize,
    pub bpm: u32,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            pitch_range: DEFAULT_PITCH_RANGE,
            velocity_base: DEFAULT_VELOCITY_BASE,
            velocity_modulation: DEFAULT_VELOCITY_MODULATION,
            voice_count: DEFAULT_VOICE_COUNT,
            bpm: DEFAULT_BPM,
        }
    }
}

impl MappingConfig {
    /// Checks the values the mapper divides by or clamps against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (low, high) = self.pitch_range;
        if low >= high || high > 127 {
            return Err(ConfigError::InvalidPitchRange(low, high));
        }
        if self.voice_count == 0 || self.voice_count > MAX_VOICE_COUNT {
            return Err(ConfigError::InvalidVoiceCount(self.voice_count));
        }
        if self.bpm == 0 {
            return Err(ConfigError::InvalidBpm(self.bpm));
        }
        Ok(())
    }
}
