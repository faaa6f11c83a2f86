//! Discovery errors.

use thiserror::Error;

/// Errors surfaced by discovery.
///
/// Network failures while probing, fetching or enriching are not errors;
/// they degrade to fewer (or zero) tools.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid baseUrl \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Discovery timed out after {0} seconds")]
    Timeout(u64),
}
