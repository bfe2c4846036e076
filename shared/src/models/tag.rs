//! Tag model

use serde::{Deserialize, Serialize};

/// Tag category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Sports,
    Department,
    Highlight,
    Event,
    #[default]
    Default,
}

impl TagKind {
    /// Wire name of this kind; `None` stands for "no type filter" in the
    /// prefix-search endpoint
    pub const fn as_str(&self) -> &'static str {
        match self {
            TagKind::Sports => "sports",
            TagKind::Department => "department",
            TagKind::Highlight => "highlight",
            TagKind::Event => "event",
            TagKind::Default => "default",
        }
    }
}

/// Tag entity
///
/// Tags are many-to-many with posts and competitions through join records;
/// entities reference tags by id, never by embedded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tag_type: TagKind,
    #[serde(default)]
    pub is_post_tag: bool,
    #[serde(default)]
    pub is_competition_tag: bool,
}

/// Create tag payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
    pub tag_type: TagKind,
    pub is_post_tag: bool,
    pub is_competition_tag: bool,
}
