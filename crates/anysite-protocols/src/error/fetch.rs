//! Network fetch errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Request to {0} timed out")]
    Timeout(String),

    #[error("Failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}
