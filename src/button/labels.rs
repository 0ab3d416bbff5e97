use serde::{Deserialize, Serialize};

/// Texts a copy button cycles through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonLabels {
    pub default: String,
    pub copying: String,
    pub copied: String,
    pub error: String,
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            default: "Copy HTML".to_string(),
            copying: "Copying...".to_string(),
            copied: "Copied!".to_string(),
            error: "Copy failed".to_string(),
        }
    }
}

/// Where a button is in its click cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    Idle,
    Busy,
    Copied,
    Failed,
}

impl ButtonPhase {
    /// Only an idle button accepts clicks
    pub fn is_interactive(&self) -> bool {
        matches!(self, ButtonPhase::Idle)
    }
}

impl ButtonLabels {
    pub fn label_for(&self, phase: ButtonPhase) -> &str {
        match phase {
            ButtonPhase::Idle => &self.default,
            ButtonPhase::Busy => &self.copying,
            ButtonPhase::Copied => &self.copied,
            ButtonPhase::Failed => &self.error,
        }
    }
}

/// Snapshot of a button after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonEvent {
    pub phase: ButtonPhase,
    pub label: String,
    pub interactive: bool,
}

impl ButtonEvent {
    pub fn new(phase: ButtonPhase, labels: &ButtonLabels) -> Self {
        Self {
            phase,
            label: labels.label_for(phase).to_string(),
            interactive: phase.is_interactive(),
        }
    }
}
