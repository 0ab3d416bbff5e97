use crate::utils::CopyError;
use async_trait::async_trait;

/// Core trait for everything that can put text on the clipboard
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    /// Returns a short identifier for logs (e.g., "native", "xclip")
    fn id(&self) -> &str;

    /// Attempts a single write of `text`. Never retries.
    async fn write_text(&self, text: &str) -> Result<(), CopyError>;
}
