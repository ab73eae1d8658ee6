// lib/src/session.rs

//! The logged-in patient.
//!
//! A [`Session`] is created once at startup from a persisted key/value
//! store, handed by reference to whichever command needs it, mutated on
//! login and logout, and nothing else holds user state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use models::PublicUser;

use crate::errors::{PhrError, Result};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

/// A string key/value store with local-storage semantics.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Keeps everything in memory. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entries: BTreeMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A JSON object on disk, rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSessionStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable one is discarded with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring corrupt session file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(FileSessionStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        debug!("Session written to {}", self.path.display());
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

pub struct Session<S: SessionStore> {
    store: S,
    user: Option<PublicUser>,
}

impl<S: SessionStore> Session<S> {
    /// Restores the persisted user, if any. A stored value that no longer
    /// decodes is removed and the session starts logged out.
    pub fn restore(mut store: S) -> Result<Self> {
        let user = match store.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<PublicUser>(&raw) {
                Ok(user) => {
                    debug!("Restored session for {}", user.email);
                    Some(user)
                }
                Err(e) => {
                    warn!("Error parsing stored user, clearing it: {}", e);
                    store.remove(USER_KEY)?;
                    None
                }
            },
            None => None,
        };
        Ok(Session { store, user })
    }

    pub fn login(&mut self, user: PublicUser) -> Result<()> {
        let raw = serde_json::to_string(&user)?;
        self.store.set(USER_KEY, &raw)?;
        info!("Session started for {}", user.email);
        self.user = Some(user);
        Ok(())
    }

    /// Clears both the user and the (unused) token.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.user.take() {
            info!("Session ended for {}", user.email);
        }
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        Ok(())
    }

    pub fn current(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    /// The logged-in user, or [`PhrError::NotLoggedIn`] for protected commands.
    pub fn require_user(&self) -> Result<&PublicUser> {
        self.user.as_ref().ok_or(PhrError::NotLoggedIn)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn patient() -> PublicUser {
        PublicUser {
            user_id: 1,
            name: "Asha".to_string(),
            age: Some(34),
            gender: Some("Female".to_string()),
            contact_number: Some("555-0100".to_string()),
            email: "asha@example.com".to_string(),
        }
    }

    #[test]
    fn starts_logged_out() {
        let session = Session::restore(MemorySessionStore::new()).unwrap();
        assert!(session.current().is_none());
        assert!(matches!(session.require_user(), Err(PhrError::NotLoggedIn)));
    }

    #[test]
    fn corrupt_user_is_dropped_on_restore() {
        let mut store = MemorySessionStore::new();
        store.set(USER_KEY, "{not json").unwrap();
        let session = Session::restore(store).unwrap();
        assert!(session.current().is_none());
        assert_eq!(session.store().get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn logout_clears_user_and_token() {
        let mut store = MemorySessionStore::new();
        store.set(TOKEN_KEY, "opaque").unwrap();
        let mut session = Session::restore(store).unwrap();
        session.login(patient()).unwrap();
        assert_eq!(session.require_user().unwrap().user_id, 1);

        session.logout().unwrap();
        assert!(session.current().is_none());
        assert_eq!(session.store().get(USER_KEY).unwrap(), None);
        assert_eq!(session.store().get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lifetrack").join("session.json");

        let mut session = Session::restore(FileSessionStore::open(&path).unwrap()).unwrap();
        session.login(patient()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("password"));

        let restored = Session::restore(FileSessionStore::open(&path).unwrap()).unwrap();
        assert_eq!(restored.current(), Some(&patient()));
        assert_eq!(restored.store().path(), path.as_path());
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = FileSessionStore::open(&path).unwrap();
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }
}
