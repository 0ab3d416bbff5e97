//! Application configuration

use crate::button::{ButtonLabels, CopyConfig};
use crate::fetcher::FetchConfig;
use crate::utils::error::HtmlClipError;
use crate::utils::platform;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Parse the fetched body as JSON before copying
    pub parse_as_structured: bool,

    /// How long the "copied"/"error" label stays up
    pub restore_delay_ms: u64,

    /// Request timeout for the page fetch
    pub request_timeout_secs: u64,

    /// User agent sent with the page fetch
    pub user_agent: String,

    /// Honour proxy environment variables
    pub use_system_proxy: bool,

    /// Button labels
    pub labels: ButtonLabels,

    /// Clipboard backend selection
    pub clipboard: ClipboardSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            parse_as_structured: false,
            restore_delay_ms: 2000,
            request_timeout_secs: 30,
            user_agent: concat!("htmlclip/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
            labels: ButtonLabels::default(),
            clipboard: ClipboardSettings::default(),
        }
    }
}

/// Clipboard backend options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Use the native clipboard when it is available
    pub prefer_native: bool,

    /// Explicit legacy copy command (program followed by arguments)
    pub fallback_command: Option<Vec<String>>,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            prefer_native: true,
            fallback_command: None,
        }
    }
}

impl AppSettings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, HtmlClipError> {
        let raw = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&raw)?;
        settings.validate()?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load settings from the platform config directory, falling back to defaults
    pub fn load_or_default() -> Self {
        let path = platform::settings_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring unreadable settings at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), HtmlClipError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Reject settings that cannot drive a fetch
    pub fn validate(&self) -> Result<(), HtmlClipError> {
        if self.request_timeout_secs == 0 {
            return Err(HtmlClipError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if let Some(command) = &self.clipboard.fallback_command {
            if command.is_empty() {
                return Err(HtmlClipError::Config(
                    "clipboard.fallback_command must name a program".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn copy_config(&self) -> CopyConfig {
        CopyConfig {
            parse_as_structured: self.parse_as_structured,
            restore_delay: Duration::from_millis(self.restore_delay_ms),
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
            use_system_proxy: self.use_system_proxy,
        }
    }
}
