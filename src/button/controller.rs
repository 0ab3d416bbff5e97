//! Click handling for a copy button
//!
//! A click fetches the button's URL, copies the body to the clipboard and
//! shows the outcome on the label for `restore_delay` before the button
//! becomes clickable again:
//!
//! ```text
//! Idle --click--> Busy --fetch ok, copy ok--> Copied --delay--> Idle
//!                  |  \--fetch ok, copy err--> Failed --delay--> Idle
//!                  \--fetch err---------------------------------> Idle
//! ```
//!
//! Clicks that arrive while the button is not idle are ignored.

use crate::button::labels::{ButtonEvent, ButtonLabels, ButtonPhase};
use crate::clipboard::ClipboardWriter;
use crate::fetcher::{FetchMode, PageSource};
use crate::utils::{CopyError, FetchError, HtmlClipError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 16;

/// Click behaviour shared by every copy button
#[derive(Debug, Clone)]
pub struct CopyConfig {
    pub parse_as_structured: bool,
    pub restore_delay: Duration,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            parse_as_structured: false,
            restore_delay: Duration::from_millis(2000),
        }
    }
}

/// How a click settled
#[derive(Debug)]
pub enum ClickOutcome {
    Copied,
    FetchFailed(FetchError),
    CopyFailed(CopyError),
    /// The button was not idle
    Ignored,
}

impl ClickOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, ClickOutcome::Copied)
    }

    /// Collapse into the crate error type for callers that only care about failure
    pub fn into_result(self) -> Result<(), HtmlClipError> {
        match self {
            ClickOutcome::Copied => Ok(()),
            ClickOutcome::FetchFailed(e) => Err(HtmlClipError::Fetch(e)),
            ClickOutcome::CopyFailed(e) => Err(HtmlClipError::Copy(e)),
            ClickOutcome::Ignored => Err(HtmlClipError::Busy),
        }
    }
}

struct ButtonState {
    phase: ButtonPhase,
    restore: Option<JoinHandle<()>>,
    /// Bumped whenever a restore is scheduled or cancelled
    generation: u64,
}

struct Shared {
    labels: ButtonLabels,
    state: Mutex<ButtonState>,
    events: broadcast::Sender<ButtonEvent>,
    /// True while a restore timer is outstanding
    pending_restore: watch::Sender<bool>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ButtonState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn transition(&self, state: &mut ButtonState, phase: ButtonPhase) {
        state.phase = phase;
        let event = ButtonEvent::new(phase, &self.labels);
        debug!("Button label -> {:?}", event.label);
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Drop any outstanding restore timer
    fn cancel_restore(&self, state: &mut ButtonState) {
        state.generation += 1;
        if let Some(handle) = state.restore.take() {
            handle.abort();
        }
        self.pending_restore.send_replace(false);
    }

    /// Timer expiry: feedback phases go back to idle
    fn restore(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation != generation {
            debug!("Ignoring restore timer from an earlier click");
            return;
        }
        state.restore = None;
        if matches!(state.phase, ButtonPhase::Copied | ButtonPhase::Failed) {
            self.transition(&mut state, ButtonPhase::Idle);
        }
        self.pending_restore.send_replace(false);
    }
}

/// Puts the button back to idle if a click is dropped before it settles
struct PendingClick<'a> {
    shared: &'a Arc<Shared>,
    armed: bool,
}

impl PendingClick<'_> {
    /// Final transition of a click, optionally followed by a delayed restore
    fn settle(mut self, phase: ButtonPhase, restore_after: Option<Duration>) {
        self.armed = false;
        let mut state = self.shared.lock();
        self.shared.transition(&mut state, phase);

        if let Some(delay) = restore_after {
            self.shared.cancel_restore(&mut state);
            let generation = state.generation;
            // Deadline is fixed at settlement, not at the task's first poll
            let deadline = tokio::time::Instant::now() + delay;
            let shared = Arc::clone(self.shared);
            state.restore = Some(tokio::spawn(async move {
                tokio::time::sleep_until(deadline).await;
                shared.restore(generation);
            }));
            self.shared.pending_restore.send_replace(true);
        }
    }
}

impl Drop for PendingClick<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Click dropped before settling, restoring button");
            let mut state = self.shared.lock();
            self.shared.transition(&mut state, ButtonPhase::Idle);
        }
    }
}

/// A "copy HTML" button bound to one URL
pub struct CopyButton {
    url: String,
    config: CopyConfig,
    source: Arc<dyn PageSource>,
    clipboard: Arc<dyn ClipboardWriter>,
    shared: Arc<Shared>,
}

impl CopyButton {
    pub fn new(
        url: impl Into<String>,
        labels: ButtonLabels,
        config: CopyConfig,
        source: Arc<dyn PageSource>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (pending_restore, _) = watch::channel(false);
        let shared = Arc::new(Shared {
            labels,
            state: Mutex::new(ButtonState {
                phase: ButtonPhase::Idle,
                restore: None,
                generation: 0,
            }),
            events,
            pending_restore,
        });

        Self {
            url: url.into(),
            config,
            source,
            clipboard,
            shared,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current label and phase
    pub fn state(&self) -> ButtonEvent {
        let state = self.shared.lock();
        ButtonEvent::new(state.phase, &self.shared.labels)
    }

    /// Receive every label transition from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ButtonEvent> {
        self.shared.events.subscribe()
    }

    /// Run one fetch-and-copy cycle
    pub async fn click(&self) -> ClickOutcome {
        {
            let mut state = self.shared.lock();
            if !state.phase.is_interactive() {
                debug!("Click ignored while {:?}", state.phase);
                return ClickOutcome::Ignored;
            }
            self.shared.transition(&mut state, ButtonPhase::Busy);
        }
        let pending = PendingClick {
            shared: &self.shared,
            armed: true,
        };

        let mode = FetchMode::from_flag(self.config.parse_as_structured);
        let payload = match self.source.fetch(&self.url, mode).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Fetching {} failed: {}", self.url, e);
                pending.settle(ButtonPhase::Idle, None);
                return ClickOutcome::FetchFailed(e);
            }
        };

        let text = payload.to_clipboard_text();
        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                info!("Copied {} bytes from {} via {}", text.len(), self.url, self.clipboard.id());
                pending.settle(ButtonPhase::Copied, Some(self.config.restore_delay));
                ClickOutcome::Copied
            }
            Err(e) => {
                warn!("Copying {} via {} failed: {}", self.url, self.clipboard.id(), e);
                pending.settle(ButtonPhase::Failed, Some(self.config.restore_delay));
                ClickOutcome::CopyFailed(e)
            }
        }
    }

    /// Cancel a pending restore and go back to idle right away.
    ///
    /// Returns false when there was nothing to reset (idle, or a click still
    /// in flight).
    pub fn reset(&self) -> bool {
        let mut state = self.shared.lock();
        if !matches!(state.phase, ButtonPhase::Copied | ButtonPhase::Failed) {
            return false;
        }
        self.shared.cancel_restore(&mut state);
        self.shared.transition(&mut state, ButtonPhase::Idle);
        true
    }

    /// Wait until no restore timer is outstanding (fired or cancelled)
    pub async fn wait_restored(&self) {
        let mut pending = self.shared.pending_restore.subscribe();
        // The sender lives as long as `self`, so this cannot fail
        let _ = pending.wait_for(|outstanding| !*outstanding).await;
    }
}

impl Drop for CopyButton {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        self.shared.cancel_restore(&mut state);
    }
}
