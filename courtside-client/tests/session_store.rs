//! Session store round-trips and external invalidation.

use tempfile::TempDir;

use courtside_client::SessionStore;
use courtside_client::routes::{self, Route};
use shared::models::Identity;

fn identity(id: i64, username: &str) -> Identity {
    Identity {
        id: Some(id),
        username: username.into(),
    }
}

#[tokio::test]
async fn test_set_get_clear_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::load(dir.path());
    assert_eq!(store.get(), None);

    store.set(identity(7, "li")).unwrap();
    assert_eq!(store.get(), Some(identity(7, "li")));
    assert!(store.file_path().exists());

    store.clear().unwrap();
    assert_eq!(store.get(), None);
    assert!(!store.file_path().exists());
}

#[tokio::test]
async fn test_persisted_identity_survives_restart() {
    let dir = TempDir::new().unwrap();
    SessionStore::load(dir.path()).set(identity(7, "li")).unwrap();

    // A new store over the same directory reads it synchronously.
    let store = SessionStore::load(dir.path());
    assert_eq!(store.get(), Some(identity(7, "li")));
}

#[tokio::test]
async fn test_reload_picks_up_external_logout() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::load(dir.path());
    store.set(identity(7, "li")).unwrap();

    // Another window removed the file.
    std::fs::remove_file(store.file_path()).unwrap();

    // The in-memory copy is refreshed opportunistically, not reactively.
    assert_eq!(store.get(), Some(identity(7, "li")));
    assert_eq!(store.reload(), None);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_reload_picks_up_external_login() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::load(dir.path());

    let other = SessionStore::load(dir.path());
    other.set(identity(9, "wang")).unwrap();

    assert_eq!(store.reload(), Some(identity(9, "wang")));
}

#[tokio::test]
async fn test_corrupt_file_reads_as_logged_out() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::load(dir.path());
    store.set(identity(7, "li")).unwrap();

    std::fs::write(store.file_path(), "not json {{{").unwrap();
    assert_eq!(SessionStore::load(dir.path()).get(), None);
    assert_eq!(store.reload(), None);
}

#[tokio::test]
async fn test_subscription_observes_login_and_logout() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::load(dir.path());
    let mut rx = store.subscribe();

    store.set(identity(7, "li")).unwrap();
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), Some(identity(7, "li")));

    store.clear().unwrap();
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), None);
}

#[tokio::test]
async fn test_route_gating_follows_session_state() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::load(dir.path());

    // Logged out: any protected route bounces to login.
    assert_eq!(routes::resolve(store.get().as_ref(), Route::Matches), Route::Login);

    store.set(identity(7, "li")).unwrap();
    let user = store.get();
    assert_eq!(routes::resolve(user.as_ref(), Route::Matches), Route::Matches);
    assert_eq!(routes::resolve(user.as_ref(), Route::Login), Route::Matches);
}
