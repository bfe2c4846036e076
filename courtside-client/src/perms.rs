//! Permission resolution
//!
//! The service hands out a flat grant list per user; capabilities are
//! derived client-side for UI gating only (the server still enforces
//! everything). A scoped action is allowed when a global manage-grant
//! exists or a scoped grant names the exact target id.

use std::sync::Arc;

use shared::models::{Permission, PermissionGrant};

use crate::api::CourtsideApi;
use crate::http::HttpApi;
use crate::notify::NotifyHandle;

/// The resolved grant set of one user
#[derive(Debug, Clone)]
pub struct PermissionSet {
    username: String,
    grants: Vec<PermissionGrant>,
}

impl PermissionSet {
    pub fn new(username: impl Into<String>, grants: Vec<PermissionGrant>) -> Self {
        Self {
            username: username.into(),
            grants,
        }
    }

    /// The no-permissions fallback
    pub fn empty(username: impl Into<String>) -> Self {
        Self::new(username, Vec::new())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn grants(&self) -> &[PermissionGrant] {
        &self.grants
    }

    /// Any grant with this name, regardless of scope info
    pub fn has_global(&self, permission: Permission) -> bool {
        self.grants
            .iter()
            .any(|g| g.permission_name == permission.as_str())
    }

    /// A grant with this name scoped to exactly this target id
    pub fn has_scoped(&self, permission: Permission, id: i64) -> bool {
        let id = id.to_string();
        self.grants
            .iter()
            .any(|g| g.permission_name == permission.as_str() && g.permission_info == id)
    }

    /// Whether the scoped action is allowed on the target: a global
    /// manage-equivalent grant, or a scoped grant naming the id
    pub fn can_act_on(&self, permission: Permission, id: i64) -> bool {
        self.has_global(manager_of(permission)) || self.has_scoped(permission, id)
    }

    // ========== Derived capabilities ==========

    pub fn can_manage_matches(&self) -> bool {
        self.has_global(Permission::ManageMatch)
    }

    pub fn can_update_match(&self, id: i64) -> bool {
        self.can_act_on(Permission::UpdateMatchInfo, id)
    }

    pub fn can_delete_match(&self) -> bool {
        self.can_manage_matches()
    }

    pub fn can_post(&self) -> bool {
        self.has_global(Permission::Post)
    }

    pub fn can_manage_forum(&self) -> bool {
        self.has_global(Permission::ManageForum)
    }

    pub fn can_manage_tags(&self) -> bool {
        self.has_global(Permission::ManageTag)
    }

    pub fn is_superadmin(&self) -> bool {
        self.has_global(Permission::Superadmin)
    }
}

/// The global permission whose holders may perform the scoped action on
/// any target
fn manager_of(permission: Permission) -> Permission {
    match permission {
        Permission::UpdateMatchInfo => Permission::ManageMatch,
        other => other,
    }
}

/// Fetches grant sets, degrading to "no permissions" on failure
///
/// Loading never fails from the caller's point of view: a network or
/// application error surfaces a notification and yields an empty set, so
/// gated UI simply stays hidden. Switching target user always refetches.
pub struct PermissionResolver<H: HttpApi> {
    api: Arc<CourtsideApi<H>>,
    notify: NotifyHandle,
}

impl<H: HttpApi> PermissionResolver<H> {
    pub fn new(api: Arc<CourtsideApi<H>>, notify: NotifyHandle) -> Self {
        Self { api, notify }
    }

    /// Load the grant set of `username`
    pub async fn load(&self, username: &str) -> PermissionSet {
        match self.api.user_permissions(username).await {
            Ok(grants) => PermissionSet::new(username, grants),
            Err(err) => {
                tracing::warn!(username, %err, "Permission lookup failed");
                self.notify.error("Could not load permission information");
                PermissionSet::empty(username)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(name: &str, info: &str) -> PermissionGrant {
        PermissionGrant {
            username: "li".into(),
            permission_name: name.into(),
            permission_info: info.into(),
        }
    }

    #[test]
    fn test_scoped_grant_gates_by_exact_id() {
        let set = PermissionSet::new("li", vec![grant("match.update_match_info", "42")]);
        assert!(set.can_act_on(Permission::UpdateMatchInfo, 42));
        assert!(!set.can_act_on(Permission::UpdateMatchInfo, 43));
    }

    #[test]
    fn test_global_manage_covers_any_target() {
        let set = PermissionSet::new("li", vec![grant("match.manage_match", "")]);
        assert!(set.can_act_on(Permission::UpdateMatchInfo, 42));
        assert!(set.can_act_on(Permission::UpdateMatchInfo, 43));
        assert!(set.can_manage_matches());
        assert!(set.can_delete_match());
    }

    #[test]
    fn test_empty_set_allows_nothing() {
        let set = PermissionSet::empty("li");
        assert!(!set.can_act_on(Permission::UpdateMatchInfo, 42));
        assert!(!set.can_post());
        assert!(!set.is_superadmin());
    }

    #[test]
    fn test_forum_capabilities() {
        let set = PermissionSet::new(
            "li",
            vec![grant("forum.post", ""), grant("tag.manage_tag", "")],
        );
        assert!(set.can_post());
        assert!(set.can_manage_tags());
        assert!(!set.can_manage_forum());
    }

    #[test]
    fn test_unknown_grant_names_are_ignored_by_predicates() {
        let set = PermissionSet::new("li", vec![grant("future.shiny_thing", "")]);
        assert!(!set.can_post());
        assert!(!set.can_manage_matches());
        assert_eq!(set.grants().len(), 1);
    }
}
