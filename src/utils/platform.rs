//! Platform-specific utilities for htmlclip
//!
//! This module provides cross-platform answers to:
//! - Where the settings file lives
//! - Which legacy copy commands exist on this system

use std::path::PathBuf;

/// Returns the configuration directory
/// - macOS: ~/Library/Application Support/htmlclip
/// - Windows: %APPDATA%\htmlclip
/// - Linux: ~/.config/htmlclip
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("htmlclip")
}

/// Default location of the settings file
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Legacy copy commands to try, in order of preference.
///
/// Each entry is a program name followed by its arguments. Every command
/// reads the text to copy from stdin.
pub fn copy_command_candidates() -> Vec<Vec<&'static str>> {
    #[cfg(target_os = "macos")]
    {
        vec![vec!["pbcopy"]]
    }

    #[cfg(target_os = "windows")]
    {
        vec![vec!["clip"]]
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut candidates = Vec::new();
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            candidates.push(vec!["wl-copy"]);
        }
        candidates.push(vec!["xclip", "-selection", "clipboard"]);
        candidates.push(vec!["xsel", "--clipboard", "--input"]);
        candidates
    }
}
