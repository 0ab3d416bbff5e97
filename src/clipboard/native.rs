//! Native clipboard access

use crate::clipboard::traits::ClipboardWriter;
use crate::utils::CopyError;
use arboard::Clipboard;
use async_trait::async_trait;
use tracing::{debug, error};

/// OS clipboard through arboard
pub struct NativeClipboard;

impl NativeClipboard {
    /// Returns a writer if a clipboard handle can be opened on this system
    pub fn detect() -> Option<Self> {
        match Clipboard::new() {
            Ok(_) => Some(NativeClipboard),
            Err(e) => {
                debug!("Native clipboard unavailable: {}", e);
                None
            }
        }
    }
}

/// How long a Linux write keeps serving the selection so a clipboard
/// manager can take ownership before the handle is dropped
#[cfg(target_os = "linux")]
const LINUX_HANDOVER: std::time::Duration = std::time::Duration::from_millis(250);

/// Set clipboard content
fn set_clipboard_content(text: &str) -> Result<(), CopyError> {
    let mut clipboard = Clipboard::new()
        .map_err(|e| CopyError::Unavailable(format!("Failed to access clipboard: {}", e)))?;

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        use std::time::Instant;

        // X11/Wayland contents vanish with their owner unless handed over
        clipboard
            .set()
            .wait_until(Instant::now() + LINUX_HANDOVER)
            .text(text.to_owned())
            .map_err(|e| CopyError::Rejected(format!("Failed to write clipboard: {}", e)))
    }

    #[cfg(not(target_os = "linux"))]
    {
        clipboard
            .set_text(text)
            .map_err(|e| CopyError::Rejected(format!("Failed to write clipboard: {}", e)))
    }
}

#[async_trait]
impl ClipboardWriter for NativeClipboard {
    fn id(&self) -> &str {
        "native"
    }

    async fn write_text(&self, text: &str) -> Result<(), CopyError> {
        let owned = text.to_string();
        let result = tokio::task::spawn_blocking(move || set_clipboard_content(&owned))
            .await
            .map_err(|e| CopyError::Rejected(format!("Clipboard task aborted: {}", e)))
            .and_then(|inner| inner);

        match &result {
            Ok(()) => debug!("Native clipboard write of {} bytes succeeded", text.len()),
            Err(e) => error!("Native clipboard write failed: {}", e),
        }
        result
    }
}
