use crate::utils::FetchError;
use serde::{Deserialize, Serialize};

/// How the response body should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchMode {
    #[default]
    Text,
    Structured,
}

impl FetchMode {
    pub fn from_flag(parse_as_structured: bool) -> Self {
        if parse_as_structured {
            FetchMode::Structured
        } else {
            FetchMode::Text
        }
    }
}

/// Body of a successful fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Structured(serde_json::Value),
}

impl Payload {
    /// Interpret a raw body according to `mode`
    pub fn from_body(body: String, mode: FetchMode) -> Result<Self, FetchError> {
        match mode {
            FetchMode::Text => Ok(Payload::Text(body)),
            FetchMode::Structured => Ok(Payload::Structured(serde_json::from_str(&body)?)),
        }
    }

    /// Text that ends up on the clipboard
    pub fn to_clipboard_text(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Structured(value) => format!("{:#}", value),
        }
    }
}
