//! Clipboard writers

pub mod fallback;
pub mod native;
pub mod system;
pub mod traits;

pub use fallback::CommandClipboard;
pub use native::NativeClipboard;
pub use system::SystemClipboard;
pub use traits::ClipboardWriter;
