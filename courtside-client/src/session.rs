//! Session store
//!
//! Holds the one process-wide authenticated identity, persisted as JSON in
//! a fixed file under the caller-supplied data directory. Another process
//! (a second window of the same installation) may rewrite or remove the
//! file at any time; consumers call [`SessionStore::reload`] on focus-like
//! events instead of caching the identity forever, and subscribe to the
//! watch channel for in-process changes.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tokio::sync::watch;

use shared::models::Identity;

use crate::ClientResult;

/// Fixed file name of the persisted identity record
const SESSION_FILE: &str = "user.json";

/// File-backed store for the current identity
pub struct SessionStore {
    file_path: PathBuf,
    current: RwLock<Option<Identity>>,
    tx: watch::Sender<Option<Identity>>,
}

impl SessionStore {
    /// Load the store, reading any persisted identity synchronously
    ///
    /// A missing or unreadable file means logged out; a corrupt file is
    /// discarded with a warning rather than surfaced.
    pub fn load(dir: &Path) -> Self {
        let file_path = dir.join(SESSION_FILE);
        let current = read_identity(&file_path);
        let (tx, _rx) = watch::channel(current.clone());

        Self {
            file_path,
            current: RwLock::new(current),
            tx,
        }
    }

    /// Current identity, if logged in
    pub fn get(&self) -> Option<Identity> {
        self.current.read().expect("session lock poisoned").clone()
    }

    /// Persist and replace the identity (login)
    pub fn set(&self, identity: Identity) -> ClientResult<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&identity)?;
        std::fs::write(&self.file_path, content)?;

        tracing::debug!(username = %identity.username, "Session saved");
        self.replace(Some(identity));
        Ok(())
    }

    /// Clear the identity (logout); callers then navigate to the login route
    pub fn clear(&self) -> ClientResult<()> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
        }
        tracing::debug!("Session cleared");
        self.replace(None);
        Ok(())
    }

    /// Re-read the persisted identity
    ///
    /// The focus/storage-event analogue: picks up logins and logouts done
    /// by another process. Returns the identity now in effect.
    pub fn reload(&self) -> Option<Identity> {
        let fresh = read_identity(&self.file_path);
        let changed = {
            let current = self.current.read().expect("session lock poisoned");
            *current != fresh
        };
        if changed {
            tracing::info!("Session changed externally, refreshed");
            self.replace(fresh.clone());
        }
        fresh
    }

    /// Subscribe to identity changes made through this store
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }

    /// Path of the persisted identity record
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn replace(&self, identity: Option<Identity>) {
        *self.current.write().expect("session lock poisoned") = identity.clone();
        // Receivers may all be gone; that is fine.
        let _ = self.tx.send(identity);
    }
}

fn read_identity(path: &Path) -> Option<Identity> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(identity) => Some(identity),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "Discarding corrupt session file");
            None
        }
    }
}
