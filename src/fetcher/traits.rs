use crate::fetcher::models::{FetchMode, Payload};
use crate::utils::FetchError;
use async_trait::async_trait;

/// Anything that can produce the rendered body behind a button
///
/// The copy button only depends on this trait, so the HTTP client can be
/// swapped for an in-memory source in tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches `url` once and yields the body, or why it could not be had
    async fn fetch(&self, url: &str, mode: FetchMode) -> Result<Payload, FetchError>;
}
