//! Permission grant model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known permission names
///
/// Two shapes exist: global permissions ignore `permission_info`, scoped
/// permissions carry a target entity id in it as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Moderate the forum (delete any post/comment, handle reports)
    #[serde(rename = "forum.manage_forum")]
    ManageForum,
    /// Create forum posts
    #[serde(rename = "forum.post")]
    Post,
    /// Mark posts as highlighted
    #[serde(rename = "forum.post_highlight")]
    PostHighlight,
    /// Manage all competitions (create, delete, edit any)
    #[serde(rename = "match.manage_match")]
    ManageMatch,
    /// Update one specific competition (scoped; info carries the match id)
    #[serde(rename = "match.update_match_info")]
    UpdateMatchInfo,
    /// Manage tags
    #[serde(rename = "tag.manage_tag")]
    ManageTag,
    /// Superadmin (may grant and revoke permissions of other users)
    #[serde(rename = "user.is_superadmin")]
    Superadmin,
}

impl Permission {
    /// Wire name of this permission
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageForum => "forum.manage_forum",
            Permission::Post => "forum.post",
            Permission::PostHighlight => "forum.post_highlight",
            Permission::ManageMatch => "match.manage_match",
            Permission::UpdateMatchInfo => "match.update_match_info",
            Permission::ManageTag => "tag.manage_tag",
            Permission::Superadmin => "user.is_superadmin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One granted permission
///
/// The name stays a plain string on the wire so grants with names this
/// client does not know are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub username: String,
    pub permission_name: String,
    #[serde(default)]
    pub permission_info: String,
}

impl PermissionGrant {
    /// The known permission for this grant, if any
    pub fn permission(&self) -> Option<Permission> {
        serde_json::from_value(serde_json::Value::String(self.permission_name.clone())).ok()
    }

    /// Whether this grant is global (carries no target entity id)
    pub fn is_global(&self) -> bool {
        self.permission_info.is_empty()
    }
}
