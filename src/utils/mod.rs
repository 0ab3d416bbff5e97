//! Utility modules for error handling, configuration and platform lookups

pub mod config;
pub mod error;
pub mod platform;

// Re-export for convenience
pub use config::{AppSettings, ClipboardSettings};
pub use error::{CopyError, FetchError, HtmlClipError};
