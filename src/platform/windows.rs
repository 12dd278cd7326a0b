// historymidi platform paths for Windows
// Config:  %APPDATA%/historymidi
// Chrome:  %LOCALAPPDATA%/Google/Chrome/User Data/Default
// Firefox: %APPDATA%/Mozilla/Firefox/Profiles/<profile>

use std::env;
use std::path::PathBuf;

fn roaming_appdata() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

fn local_appdata() -> PathBuf {
    PathBuf::from(
        env::var("LOCALAPPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local")),
    )
}

/// `%APPDATA%/historymidi`
pub fn get_config_dir() -> PathBuf {
    roaming_appdata().join("historymidi")
}

/// `%LOCALAPPDATA%/Google/Chrome/User Data/Default`
pub fn chrome_profile_dir() -> PathBuf {
    local_appdata()
        .join("Google")
        .join("Chrome")
        .join("User Data")
        .join("Default")
}

/// `%APPDATA%/Mozilla/Firefox/Profiles`
pub fn firefox_profiles_dir() -> PathBuf {
    roaming_appdata()
        .join("Mozilla")
        .join("Firefox")
        .join("Profiles")
}
