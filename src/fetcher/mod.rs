pub mod client;
pub mod models;
pub mod traits;

pub use client::{is_success_status, FetchConfig, PageFetcher};
pub use models::{FetchMode, Payload};
pub use traits::PageSource;
