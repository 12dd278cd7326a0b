// historymidi platform abstraction
// Knows where Chrome and Firefox keep their history databases on Windows,
// macOS and Linux, and where historymidi keeps its own config file.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::types::browser::Browser;
use crate::types::errors::HistorySourceError;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as os;

#[cfg(target_os = "macos")]
use macos as os;

#[cfg(target_os = "windows")]
use windows as os;

/// Name of the Firefox history database inside a profile directory.
pub const FIREFOX_HISTORY_FILE: &str = "places.sqlite";

/// Returns the platform-specific configuration directory for historymidi.
///
/// - **Linux**: `~/.config/historymidi` (or `$XDG_CONFIG_HOME/historymidi`)
/// - **macOS**: `~/Library/Application Support/historymidi`
/// - **Windows**: `%APPDATA%/historymidi`
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub fn get_config_dir() -> PathBuf {
    os::get_config_dir()
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn get_config_dir() -> PathBuf {
    PathBuf::from(".historymidi")
}

/// Locates the history database of `browser` for the current user.
///
/// Firefox keeps one database per profile; the most recently modified
/// profile that actually has a history database wins.
///
/// # Errors
/// - `UnsupportedPlatform` when the OS has no known browser layout.
/// - `ProfileNotFound` when Firefox has no usable profile.
/// - `NotFound` when the resolved file does not exist.
pub fn locate_history(browser: Browser) -> Result<PathBuf, HistorySourceError> {
    let path = match browser {
        Browser::Chrome => chrome_history_path()?,
        Browser::Firefox => {
            let profiles = firefox_profiles_dir()?;
            latest_profile_dir(&profiles)?.join(FIREFOX_HISTORY_FILE)
        }
    };
    ensure_exists(&path)?;
    Ok(path)
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
fn chrome_history_path() -> Result<PathBuf, HistorySourceError> {
    Ok(os::chrome_profile_dir().join("History"))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn chrome_history_path() -> Result<PathBuf, HistorySourceError> {
    Err(HistorySourceError::UnsupportedPlatform(
        std::env::consts::OS.to_string(),
    ))
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
fn firefox_profiles_dir() -> Result<PathBuf, HistorySourceError> {
    Ok(os::firefox_profiles_dir())
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn firefox_profiles_dir() -> Result<PathBuf, HistorySourceError> {
    Err(HistorySourceError::UnsupportedPlatform(
        std::env::consts::OS.to_string(),
    ))
}

/// Picks the most recently modified subdirectory of `base` that contains a
/// Firefox history database.
pub fn latest_profile_dir(base: &Path) -> Result<PathBuf, HistorySourceError> {
    let not_found = || HistorySourceError::ProfileNotFound(base.display().to_string());
    let entries = fs::read_dir(base).map_err(|_| not_found())?;

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() || !path.join(FIREFOX_HISTORY_FILE).is_file() {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if best.as_ref().map_or(true, |(t, _)| modified > *t) {
            best = Some((modified, path));
        }
    }

    best.map(|(_, path)| path).ok_or_else(not_found)
}

fn ensure_exists(path: &Path) -> Result<(), HistorySourceError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(HistorySourceError::NotFound(path.display().to_string()))
    }
}
