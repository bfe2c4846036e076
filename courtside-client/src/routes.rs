//! Route gating
//!
//! Pure redirect rules for the application's views: everything except
//! login/register requires a session, and a logged-in user never sees the
//! login or register screens.

use shared::models::Identity;

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Matches,
    Forum,
    TagManage,
    ForumManage,
}

impl Route {
    /// Whether this route is reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// The landing route for the given session state
pub fn home(user: Option<&Identity>) -> Route {
    if user.is_some() {
        Route::Matches
    } else {
        Route::Login
    }
}

/// Resolve a navigation request against the session state
///
/// Unauthenticated users are redirected to login for every protected
/// route; authenticated users requesting login/register land on the
/// default view instead.
pub fn resolve(user: Option<&Identity>, requested: Route) -> Route {
    match (user, requested.is_public()) {
        (None, true) => requested,
        (None, false) => Route::Login,
        (Some(_), true) => Route::Matches,
        (Some(_), false) => requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Identity {
        Identity {
            id: Some(7),
            username: "li".into(),
        }
    }

    #[test]
    fn test_unauthenticated_is_redirected_to_login() {
        for route in [
            Route::Dashboard,
            Route::Matches,
            Route::Forum,
            Route::TagManage,
            Route::ForumManage,
        ] {
            assert_eq!(resolve(None, route), Route::Login);
        }
    }

    #[test]
    fn test_unauthenticated_can_reach_public_routes() {
        assert_eq!(resolve(None, Route::Login), Route::Login);
        assert_eq!(resolve(None, Route::Register), Route::Register);
    }

    #[test]
    fn test_authenticated_skips_login_and_register() {
        let u = user();
        assert_eq!(resolve(Some(&u), Route::Login), Route::Matches);
        assert_eq!(resolve(Some(&u), Route::Register), Route::Matches);
    }

    #[test]
    fn test_authenticated_reaches_protected_routes() {
        let u = user();
        assert_eq!(resolve(Some(&u), Route::Forum), Route::Forum);
        assert_eq!(resolve(Some(&u), Route::TagManage), Route::TagManage);
    }

    #[test]
    fn test_home() {
        assert_eq!(home(None), Route::Login);
        assert_eq!(home(Some(&user())), Route::Matches);
    }
}
