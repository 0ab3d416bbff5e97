//! htmlclip - copy a rendered page's HTML to the clipboard
//!
//! Builds one copy button for the given URL, clicks it, prints every label
//! the button shows and waits until it is clickable again.

use anyhow::{Context, Result};
use clap::Parser;
use htmlclip::{AppSettings, CopyButton, PageFetcher, SystemClipboard};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Page to fetch
    url: String,

    /// Parse the response as JSON before copying
    #[arg(long)]
    json: bool,

    /// How long the "copied"/"error" label stays up, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the native clipboard and use the platform copy command
    #[arg(long)]
    fallback_only: bool,
}

impl Args {
    fn settings(&self) -> Result<AppSettings> {
        let mut settings = match &self.config {
            Some(path) => AppSettings::load(path)
                .with_context(|| format!("Failed to load settings from {:?}", path))?,
            None => AppSettings::load_or_default(),
        };

        if self.json {
            settings.parse_as_structured = true;
        }
        if let Some(delay) = self.delay_ms {
            settings.restore_delay_ms = delay;
        }
        if let Some(timeout) = self.timeout_secs {
            settings.request_timeout_secs = timeout;
        }
        if self.fallback_only {
            settings.clipboard.prefer_native = false;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = args.settings()?;
    let fetcher = PageFetcher::new(&settings.fetch_config())?;
    let clipboard = SystemClipboard::detect(&settings.clipboard);

    let button = CopyButton::new(
        args.url.clone(),
        settings.labels.clone(),
        settings.copy_config(),
        Arc::new(fetcher),
        Arc::new(clipboard),
    );

    println!("{} [{}]", button.url(), button.state().label);
    let mut events = button.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("[{}]", event.label);
        }
    });

    let outcome = button.click().await;
    button.wait_restored().await;
    drop(button);
    let _ = printer.await;

    outcome
        .into_result()
        .with_context(|| format!("Copying {} failed", args.url))
}
