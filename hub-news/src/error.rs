//! Error types for the news module

use thiserror::Error;

/// Errors that can occur while retrieving feed documents
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Relay returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Relay answered but the body could not be used
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A relay attempt exceeded its time bound
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Every configured relay failed for this URL
    #[error("All relays failed for {0}")]
    AllRelaysFailed(String),
}
