//! HTTP page fetcher

use crate::fetcher::models::{FetchMode, Payload};
use crate::fetcher::traits::PageSource;
use crate::utils::FetchError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// Header marking the request as programmatic rather than a navigation
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Status codes that count as a successful fetch: 0 (opaque/local) or 200..400
pub fn is_success_status(status: u16) -> bool {
    status == 0 || (200..400).contains(&status)
}

/// Fetch configuration
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// Honour HTTP(S)_PROXY from the environment
    pub use_system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("htmlclip/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// Fetches rendered pages over HTTP
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch(&self, url: &str, mode: FetchMode) -> Result<Payload, FetchError> {
        let target =
            Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("GET {}", target);
        let response = self
            .client
            .get(target)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {} failed: {}", url, e);
                FetchError::Transport(e)
            })?;

        let status = response.status().as_u16();
        if !is_success_status(status) {
            warn!("Request to {} returned status {}", url, status);
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Payload::from_body(body, mode).map_err(|e| {
            warn!("Response from {} is not valid JSON: {}", url, e);
            e
        })
    }
}
