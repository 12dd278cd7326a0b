// historymidi shared type definitions
// Each submodule defines types used across the application.

pub mod browser;
pub mod config;
pub mod errors;
pub mod history;
pub mod note;
