//! Native-first clipboard with a legacy fallback

use crate::clipboard::fallback::CommandClipboard;
use crate::clipboard::native::NativeClipboard;
use crate::clipboard::traits::ClipboardWriter;
use crate::utils::{ClipboardSettings, CopyError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Picks the native clipboard when present, otherwise the legacy command.
///
/// A native rejection is reported as-is; the fallback is only for systems
/// where no native handle exists at all.
pub struct SystemClipboard {
    native: Option<Arc<dyn ClipboardWriter>>,
    fallback: Option<Arc<dyn ClipboardWriter>>,
}

impl SystemClipboard {
    pub fn new(
        native: Option<Arc<dyn ClipboardWriter>>,
        fallback: Option<Arc<dyn ClipboardWriter>>,
    ) -> Self {
        Self { native, fallback }
    }

    /// Probe the current system according to `settings`
    pub fn detect(settings: &ClipboardSettings) -> Self {
        let native = if settings.prefer_native {
            NativeClipboard::detect().map(|n| Arc::new(n) as Arc<dyn ClipboardWriter>)
        } else {
            None
        };

        let fallback = match &settings.fallback_command {
            Some(command) => CommandClipboard::from_command(command),
            None => CommandClipboard::detect(),
        }
        .map(|c| Arc::new(c) as Arc<dyn ClipboardWriter>);

        if native.is_none() && fallback.is_none() {
            warn!("No clipboard backend available; copies will fail");
        }

        Self::new(native, fallback)
    }

    /// Identifier of the writer that will handle the next copy
    pub fn active_id(&self) -> Option<&str> {
        self.native
            .as_ref()
            .or(self.fallback.as_ref())
            .map(|writer| writer.id())
    }
}

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    fn id(&self) -> &str {
        self.active_id().unwrap_or("none")
    }

    async fn write_text(&self, text: &str) -> Result<(), CopyError> {
        if let Some(native) = &self.native {
            return native.write_text(text).await.map_err(|e| {
                error!("Async: could not copy text: {}", e);
                e
            });
        }

        match &self.fallback {
            Some(fallback) => {
                debug!("Native clipboard absent, using {}", fallback.id());
                fallback.write_text(text).await
            }
            None => Err(CopyError::Unavailable(
                "no native clipboard and no copy command found".to_string(),
            )),
        }
    }
}
