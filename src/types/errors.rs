use std::fmt;

// === MalformedUrl ===

/// A URL that cannot be split into its components.
///
/// The normalizer returns this so the mapper can skip the record; it is never
/// surfaced to the user as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedUrl(pub String);

impl fmt::Display for MalformedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed URL: {}", self.0)
    }
}

impl std::error::Error for MalformedUrl {}

// === HistorySourceError ===

/// Errors related to locating and reading a browser history database.
#[derive(Debug)]
pub enum HistorySourceError {
    /// The browser name is not one we know how to read.
    UnsupportedBrowser(String),
    /// The browser's history location is unknown on this operating system.
    UnsupportedPlatform(String),
    /// The history database file does not exist.
    NotFound(String),
    /// No browser profile directory could be found.
    ProfileNotFound(String),
    /// Copying or inspecting files failed.
    Io(String),
    /// Opening or querying the SQLite database failed.
    Database(String),
}

impl fmt::Display for HistorySourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistorySourceError::UnsupportedBrowser(name) => {
                write!(f, "Unsupported browser: {}", name)
            }
            HistorySourceError::UnsupportedPlatform(os) => {
                write!(f, "Unsupported operating system: {}", os)
            }
            HistorySourceError::NotFound(path) => write!(f, "History file not found at: {}", path),
            HistorySourceError::ProfileNotFound(dir) => {
                write!(f, "No browser profile found in: {}", dir)
            }
            HistorySourceError::Io(msg) => write!(f, "History file error: {}", msg),
            HistorySourceError::Database(msg) => write!(f, "History database error: {}", msg),
        }
    }
}

impl std::error::Error for HistorySourceError {}

impl From<rusqlite::Error> for HistorySourceError {
    fn from(err: rusqlite::Error) -> Self {
        HistorySourceError::Database(err.to_string())
    }
}

// === ConfigError ===

/// Errors related to loading, saving and validating the mapping configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The pitch range is empty, inverted or leaves the MIDI note range.
    InvalidPitchRange(u8, u8),
    /// The voice count is zero or exceeds the MIDI channel count.
    InvalidVoiceCount(usize),
    /// The tempo is zero.
    InvalidBpm(u32),
    /// Reading or writing the config file failed.
    Io(String),
    /// The config file is not valid JSON for a `MappingConfig`.
    Serialization(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPitchRange(low, high) => {
                write!(f, "Invalid pitch range: {}..={}", low, high)
            }
            ConfigError::InvalidVoiceCount(count) => write!(f, "Invalid voice count: {}", count),
            ConfigError::InvalidBpm(bpm) => write!(f, "Invalid BPM: {}", bpm),
            ConfigError::Io(msg) => write!(f, "Config IO error: {}", msg),
            ConfigError::Serialization(msg) => write!(f, "Config serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// === MidiWriteError ===

/// Errors related to encoding and writing the MIDI file.
#[derive(Debug)]
pub enum MidiWriteError {
    /// More voices than there are MIDI tracks we are willing to emit.
    TooManyVoices(usize),
    /// A note starts or ends later than the file can address, in beats.
    TimelineTooLong(f64),
    /// midly rejected the event stream.
    Encode(String),
    /// Writing the output file failed.
    Io(String),
}

impl fmt::Display for MidiWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiWriteError::TooManyVoices(count) => {
                write!(f, "Too many voices for a MIDI file: {}", count)
            }
            MidiWriteError::TimelineTooLong(beats) => {
                write!(f, "Note at beat {} is beyond the MIDI timeline", beats)
            }
            MidiWriteError::Encode(msg) => write!(f, "MIDI encoding failed: {}", msg),
            MidiWriteError::Io(msg) => write!(f, "MIDI write error: {}", msg),
        }
    }
}

impl std::error::Error for MidiWriteError {}

// === AppError ===

/// Top-level error for one history-to-MIDI run.
#[derive(Debug)]
pub enum AppError {
    History(HistorySourceError),
    Config(ConfigError),
    Midi(MidiWriteError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::History(e) => write!(f, "{}", e),
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Midi(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::History(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Midi(e) => Some(e),
        }
    }
}

impl From<HistorySourceError> for AppError {
    fn from(err: HistorySourceError) -> Self {
        AppError::History(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<MidiWriteError> for AppError {
    fn from(err: MidiWriteError) -> Self {
        AppError::Midi(err)
    }
}
