//! Generative-text provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Map an HTTP error status and message to the matching variant.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            400 => Self::InvalidRequest(message),
            429 => Self::RateLimited {
                retry_after_seconds: 60,
            },
            _ => Self::ApiError { status, message },
        }
    }
}
