// historymidi platform paths for Linux
// Config:  ~/.config/historymidi
// Chrome:  ~/.config/google-chrome/Default
// Firefox: ~/.mozilla/firefox/<profile>

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for historymidi on Linux.
/// Uses `$XDG_CONFIG_HOME/historymidi` if set, otherwise `~/.config/historymidi`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("historymidi")
    } else {
        home_dir().join(".config").join("historymidi")
    }
}

/// Chrome's default profile directory.
pub fn chrome_profile_dir() -> PathBuf {
    home_dir()
        .join(".config")
        .join("google-chrome")
        .join("Default")
}

/// Directory holding one subdirectory per Firefox profile.
pub fn firefox_profiles_dir() -> PathBuf {
    home_dir().join(".mozilla").join("firefox")
}
