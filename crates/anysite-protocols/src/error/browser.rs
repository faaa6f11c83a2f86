//! Browser automation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Chrome executable not found")]
    ChromeNotFound,

    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Browser protocol error: {0}")]
    Protocol(String),

    #[error("Browser session closed")]
    Closed,
}
