//! Moderation report model

use serde::{Deserialize, Serialize};

/// Kind of object a comment or report points at
///
/// Top-level comments attach to a `Post`; replies and reports may attach
/// to a `Comment` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Post,
    Comment,
}

/// A user-filed report against a post or comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub report_id: i64,
    pub reporter: String,
    pub content_type: ContentKind,
    pub object_id: i64,
    pub reason: String,
    #[serde(default)]
    pub solved_state: bool,
    #[serde(default)]
    pub created_at: String,
}
