//! Shared types for the Courtside client
//!
//! Wire-level types used across the workspace: the API response envelope,
//! the numeric error-code table, request/cursor types, and entity models.

pub mod error;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, ErrorCode};
pub use request::Cursor;
pub use response::ApiEnvelope;
