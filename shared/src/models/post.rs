//! Forum post and comment models

use serde::{Deserialize, Serialize};

/// A forum post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub post_id: i64,
    pub author: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

/// A comment or reply
///
/// Replies are flat on the wire: `father_object_id` points either at the
/// root comment or at another reply of the same comment. Display nesting
/// is reconstructed client-side solely from these links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub father_object_id: Option<i64>,
    #[serde(default = "default_allow_reply")]
    pub allow_reply: bool,
}

fn default_allow_reply() -> bool {
    true
}
