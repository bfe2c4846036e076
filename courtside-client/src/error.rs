//! Client error types

use shared::{ApiError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection, timeout, malformed transfer)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Application-level error from the response envelope
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Envelope decoded but the expected payload is missing
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client-side validation failure; never sent to the server
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session file I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The application error, when this failure came from the envelope
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Result code for this failure: the envelope code for application
    /// errors, the synthetic network code for everything else
    pub fn code(&self) -> i32 {
        match self {
            ClientError::Api(err) => err.code,
            _ => ErrorCode::Network.code(),
        }
    }

    /// Whether this is the explicit out-of-range / end-of-list signal
    pub fn is_out_of_range(&self) -> bool {
        self.api().is_some_and(ApiError::is_out_of_range)
    }

    /// Message suitable for a user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api(err) => err.user_message().to_string(),
            ClientError::Validation(msg) => msg.clone(),
            _ => ErrorCode::Network.message().to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
