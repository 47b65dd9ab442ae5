//! Error types for the hub

use thiserror::Error;

/// Hub-wide error type
#[derive(Error, Debug)]
pub enum HubError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl HubError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        HubError::NotFound(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        HubError::Storage(msg.into())
    }
}
