//! Error system for the Courtside client
//!
//! - [`ErrorCode`]: the known numeric codes carried in the response envelope
//! - [`ApiError`]: an application-level failure decoded at the network
//!   boundary, keeping the raw code so unknown values are not lost

mod codes;

pub use codes::{ErrorCode, UnknownErrorCode};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level error reported by the remote service
///
/// Carries the raw numeric code alongside the server-supplied message so
/// that unrecognized codes still surface something meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("api error {code}: {message}")]
pub struct ApiError {
    /// Raw result code from the envelope
    pub code: i32,
    /// Server-supplied message
    pub message: String,
}

impl ApiError {
    /// Create an error from a raw envelope code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create an error from a known code, using its fixed message
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            message: code.message().to_string(),
        }
    }

    /// The synthetic transport-failure error
    pub fn network() -> Self {
        Self::from_code(ErrorCode::Network)
    }

    /// The known code for this error, if any
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::try_from(self.code).ok()
    }

    /// Whether this error is an explicit out-of-range / end-of-list signal
    pub fn is_out_of_range(&self) -> bool {
        self.error_code().is_some_and(|c| c.is_out_of_range())
    }

    /// User-facing message: the fixed table entry for known codes, the
    /// server message otherwise (or a generic fallback when that is empty)
    pub fn user_message(&self) -> &str {
        match self.error_code() {
            Some(code) => code.message(),
            None if !self.message.is_empty() => &self.message,
            None => "Operation failed",
        }
    }
}
