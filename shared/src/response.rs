//! API response envelope
//!
//! Every endpoint of the remote service answers with the same JSON shape:
//!
//! ```json
//! {
//!     "code": 0,
//!     "msg": "ok",
//!     "data": { ... }
//! }
//! ```
//!
//! `code == 0` denotes success; any other value is an application-level
//! error. The envelope is decoded once at the network boundary and
//! converted into a `Result` so that callers never inspect raw codes.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ErrorCode};

/// Unified response envelope for all remote calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Application result code (0 = success)
    pub code: i32,
    /// Server-supplied message
    #[serde(default)]
    pub msg: String,
    /// Response payload (absent on most errors)
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the envelope carries a success code
    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success.code()
    }

    /// Convert into the payload, mapping non-zero codes to [`ApiError`].
    ///
    /// A success envelope without a payload yields `Ok(None)`; callers that
    /// require data decide how to treat the missing-payload case.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::new(self.code, self.msg))
        }
    }
}
