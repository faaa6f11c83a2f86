//! CDP error types.

use anysite_protocols::BrowserError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Chrome not reachable on its debugging endpoint.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Error reply to a CDP command.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ChromeNotAvailable(m) | CdpError::ConnectionFailed(m) => {
                BrowserError::LaunchFailed(m)
            }
            CdpError::NavigationFailed(m) => BrowserError::NavigationFailed(m),
            CdpError::ElementNotFound(selector) => BrowserError::ElementNotFound(selector),
            CdpError::Timeout(m) => BrowserError::Timeout(m),
            CdpError::SessionClosed => BrowserError::Closed,
            other => BrowserError::Protocol(other.to_string()),
        }
    }
}
