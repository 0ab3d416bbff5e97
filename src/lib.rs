//! htmlclip library

pub mod button;
pub mod clipboard;
pub mod fetcher;
pub mod utils;

// Re-export main types for easier use
pub use button::{ButtonEvent, ButtonLabels, ButtonPhase, ClickOutcome, CopyButton, CopyConfig};
pub use clipboard::{ClipboardWriter, CommandClipboard, NativeClipboard, SystemClipboard};
pub use fetcher::{FetchConfig, FetchMode, PageFetcher, PageSource, Payload};
pub use utils::{AppSettings, CopyError, FetchError, HtmlClipError};
