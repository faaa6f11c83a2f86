//! Tool execution output.

use serde::{Deserialize, Serialize};

/// Value returned by a tool execution.
///
/// Serializes untagged: a JSON value, a plain string, or
/// `{"success": true, "url": "..."}` for browser sequences without an
/// extract step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// A browser sequence finished without extracting anything.
    Navigated { success: bool, url: String },

    /// Parsed JSON response body.
    Json(serde_json::Value),

    /// Raw text response body or extracted page text.
    Text(String),
}

impl ToolOutput {
    /// Success marker carrying the page's final URL.
    pub fn navigated(url: impl Into<String>) -> Self {
        Self::Navigated {
            success: true,
            url: url.into(),
        }
    }

    /// Convert into a plain JSON value.
    pub fn into_value(self) -> serde_json::Value {
        match self {
            Self::Navigated { success, url } => serde_json::json!({ "success": success, "url": url }),
            Self::Json(value) => value,
            Self::Text(text) => serde_json::Value::String(text),
        }
    }

    /// Text content, if this is a text output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}
