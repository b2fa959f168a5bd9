//! Persisted session state: the bearer token and the cached user record.
//!
//! This is the single source of truth for authentication. Everything that
//! issues HTTP requests receives a handle to the same store instead of
//! reading credentials out of ambient storage on its own.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::app::{GazetteError, Result};
use crate::domain::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    token: Option<String>,
    user: Option<User>,
}

pub struct SessionStore {
    data: RwLock<SessionData>,
    /// None for in-memory stores (tests); changes are not persisted.
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Open the session at the default platform path, loading any
    /// previously saved token.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_session_path()?)
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| GazetteError::Session(format!("corrupt session file: {}", e)))?
        } else {
            SessionData::default()
        };

        Ok(Self {
            data: RwLock::new(data),
            path: Some(path),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(SessionData::default()),
            path: None,
        }
    }

    fn default_session_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GazetteError::Config("Could not find data directory".into()))?;
        let gazette_dir = data_dir.join("gazette");
        std::fs::create_dir_all(&gazette_dir)?;
        Ok(gazette_dir.join("session.json"))
    }

    /// The session data stays valid even if a holder of the lock panicked;
    /// readers recover the guard instead of cascading the panic.
    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SessionData>> {
        self.data
            .write()
            .map_err(|_| GazetteError::Session("session state poisoned".into()))
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store a fresh token (and user, when the server returned one).
    pub fn store(&self, token: String, user: Option<User>) -> Result<()> {
        {
            let mut data = self.write()?;
            data.token = Some(token);
            if user.is_some() {
                data.user = user;
            }
        }
        self.persist()
    }

    /// Replace the cached user record, keeping the token.
    pub fn update_user(&self, user: User) -> Result<()> {
        self.write()?.user = Some(user);
        self.persist()
    }

    pub fn clear(&self) -> Result<()> {
        *self.write()? = SessionData::default();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = self.read().clone();
        let content = serde_json::to_string_pretty(&data)
            .map_err(|e| GazetteError::Session(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 3,
            name: "Lea".into(),
            email: Some("lea@example.com".into()),
            image: None,
        }
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(path.clone()).unwrap();
        assert!(!store.is_signed_in());
        store.store("tok-1".into(), Some(user())).unwrap();

        let reopened = SessionStore::open(path).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("tok-1"));
        assert_eq!(reopened.user().unwrap().name, "Lea");
    }

    #[test]
    fn test_clear_removes_token_and_user() {
        let store = SessionStore::in_memory();
        store.store("tok".into(), Some(user())).unwrap();
        store.clear().unwrap();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_store_without_user_keeps_cached_user() {
        let store = SessionStore::in_memory();
        store.store("tok-1".into(), Some(user())).unwrap();
        store.store("tok-2".into(), None).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-2"));
        assert_eq!(store.user().unwrap().id, 3);
    }

    #[test]
    fn test_poisoned_lock_degrades_to_error() {
        use std::sync::Arc;

        let store = Arc::new(SessionStore::in_memory());
        store.store("tok".into(), Some(user())).unwrap();

        // Panic while holding the write guard to poison the lock.
        let holder = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.data.write().unwrap();
            panic!("holder died");
        })
        .join();

        // Reads still serve the intact data; writes report an error
        // instead of panicking inside a request path.
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert!(matches!(
            store.clear(),
            Err(GazetteError::Session(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(SessionStore::open(path).is_err());
    }
}
