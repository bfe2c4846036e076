//! User models

use serde::{Deserialize, Serialize};

/// The authenticated identity, as persisted in the session file
///
/// `id` is absent for accounts created before ids were exposed; every
/// consumer must treat it as optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Option<i64>,
    pub username: String,
}

impl Identity {
    /// Numeric id for endpoints that encode "anonymous" as `-1`
    pub fn user_id_or_anonymous(&self) -> i64 {
        self.id.unwrap_or(-1)
    }
}

/// Public profile information for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub nickname: String,
}
