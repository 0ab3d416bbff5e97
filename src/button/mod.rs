//! The copy button: labels, phases and click orchestration

pub mod controller;
pub mod labels;

pub use controller::{ClickOutcome, CopyButton, CopyConfig};
pub use labels::{ButtonEvent, ButtonLabels, ButtonPhase};
