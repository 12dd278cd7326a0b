// historymidi platform paths for macOS
// Config:  ~/Library/Application Support/historymidi
// Chrome:  ~/Library/Application Support/Google/Chrome/Default
// Firefox: ~/Library/Application Support/Firefox/Profiles/<profile>

use std::env;
use std::path::PathBuf;

/// Returns the home directory on macOS.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

fn application_support() -> PathBuf {
    home_dir().join("Library").join("Application Support")
}

/// `~/Library/Application Support/historymidi`
pub fn get_config_dir() -> PathBuf {
    application_support().join("historymidi")
}

/// `~/Library/Application Support/Google/Chrome/Default`
pub fn chrome_profile_dir() -> PathBuf {
    application_support()
        .join("Google")
        .join("Chrome")
        .join("Default")
}

/// `~/Library/Application Support/Firefox/Profiles`
pub fn firefox_profiles_dir() -> PathBuf {
    application_support().join("Firefox").join("Profiles")
}
