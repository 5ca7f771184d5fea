//! The session store.

use std::sync::Arc;

use backoffice_client::{TokenSource, User};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::navigator::{LogNavigator, Navigator};
use crate::storage::KeyValueStorage;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key of the current role name.
pub const ROLE_KEY: &str = "role";

/// Storage key of the last known user (JSON).
pub const USER_KEY: &str = "user";

/// Where a forced logout sends the user.
pub const LOGIN_PATH: &str = "/login";

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl Session {
    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Current auth token and role, mirrored to durable storage.
///
/// Construct one per process and share it by `Arc`; it is also the
/// [`TokenSource`] handed to the HTTP client.
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn KeyValueStorage>,
    navigator: Arc<dyn Navigator>,
}

impl SessionStore {
    /// Open the session persisted in `storage`. Absent keys mean no session.
    ///
    /// Storage that can't be parsed is reset and the session starts signed
    /// out.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        let state = match load(storage.as_ref()) {
            Ok(state) => state,
            Err(Error::Corrupt { path, source }) => {
                warn!(%path, error = %source, "session storage unreadable, starting signed out");
                storage.clear()?;
                Session::default()
            }
            Err(e) => return Err(e),
        };
        debug!(
            authenticated = state.is_authenticated(),
            role = state.role.as_deref(),
            "session loaded"
        );
        Ok(Self {
            state: RwLock::new(state),
            storage,
            navigator: Arc::new(LogNavigator),
        })
    }

    /// Use `navigator` for the hard redirect performed by [`force_logout`](Self::force_logout).
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Current token.
    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    /// Current role name.
    pub fn role(&self) -> Option<String> {
        self.state.read().role.clone()
    }

    /// Copy of the whole session.
    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// Set or clear the token. `Some` persists it, `None` removes the key.
    ///
    /// Storage is written first; on failure the in-memory token is unchanged.
    pub fn set_token(&self, token: Option<String>) -> Result<()> {
        self.persist(TOKEN_KEY, token.as_deref())?;
        self.state.write().token = token;
        Ok(())
    }

    /// Set or clear the role, with the same persistence rule as the token.
    pub fn set_role(&self, role: Option<String>) -> Result<()> {
        self.persist(ROLE_KEY, role.as_deref())?;
        self.state.write().role = role;
        Ok(())
    }

    /// Remember the last signed-in user.
    pub fn remember_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &json)
    }

    /// The last signed-in user, if one was remembered.
    pub fn last_user(&self) -> Result<Option<User>> {
        match self.storage.get(USER_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Drop the session and hard-redirect to the login page.
    ///
    /// The redirect happens even when clearing the stored keys fails; the
    /// storage error is returned afterwards.
    pub fn force_logout(&self) -> Result<()> {
        let token = self.set_token(None);
        let role = self.set_role(None);
        info!("session cleared, forcing logout");
        self.navigator.assign(LOGIN_PATH);
        token.and(role)
    }

    fn persist(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.storage.set(key, value),
            None => self.storage.remove(key),
        }
    }
}

fn load(storage: &dyn KeyValueStorage) -> Result<Session> {
    Ok(Session {
        token: storage.get(TOKEN_KEY)?,
        role: storage.get(ROLE_KEY)?,
    })
}

impl TokenSource for SessionStore {
    fn token(&self) -> Option<String> {
        SessionStore::token(self)
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(read_only())
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(read_only())
        }

        fn clear(&self) -> Result<()> {
            Err(read_only())
        }
    }

    fn read_only() -> Error {
        Error::Io {
            path: "session.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn assign(&self, location: &str) {
            self.visited.lock().push(location.to_string());
        }
    }

    fn store_with(storage: &Arc<MemoryStorage>) -> SessionStore {
        SessionStore::new(storage.clone()).unwrap()
    }

    #[test]
    fn test_initializes_from_storage() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (TOKEN_KEY, "abc"),
            (ROLE_KEY, "admin"),
        ]));
        let store = store_with(&storage);
        assert_eq!(
            store.snapshot(),
            Session {
                token: Some("abc".into()),
                role: Some("admin".into()),
            }
        );
    }

    #[test]
    fn test_empty_storage_means_anonymous() {
        let store = store_with(&Arc::new(MemoryStorage::new()));
        assert!(!store.is_authenticated());
        assert!(store.role().is_none());
    }

    #[test]
    fn test_set_token_persists_and_removes() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(&storage);

        store.set_token(Some("abc".into())).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(store.token().as_deref(), Some("abc"));

        store.set_token(None).unwrap();
        assert!(!storage.contains(TOKEN_KEY));
        assert!(store.token().is_none());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let store = SessionStore::new(Arc::new(ReadOnlyStorage)).unwrap();

        assert!(store.set_token(Some("abc".into())).is_err());
        assert!(store.token().is_none());
        assert!(store.set_role(Some("admin".into())).is_err());
        assert!(store.role().is_none());
    }

    #[test]
    fn test_corrupt_file_resets_to_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = Arc::new(FileStorage::new(&path));
        let store = SessionStore::new(storage.clone()).unwrap();

        assert_eq!(store.snapshot(), Session::default());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        store.set_token(Some("abc".into())).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_store_is_a_token_source() {
        let store = Arc::new(store_with(&Arc::new(MemoryStorage::new())));
        let source: Arc<dyn TokenSource> = store.clone();
        assert!(source.token().is_none());
        store.set_token(Some("abc".into())).unwrap();
        assert_eq!(source.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_force_logout_clears_and_redirects() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (TOKEN_KEY, "abc"),
            (ROLE_KEY, "admin"),
        ]));
        let navigator = Arc::new(RecordingNavigator::default());
        let store = store_with(&storage).with_navigator(navigator.clone());

        store.force_logout().unwrap();

        assert_eq!(store.snapshot(), Session::default());
        assert!(!storage.contains(TOKEN_KEY));
        assert!(!storage.contains(ROLE_KEY));
        assert_eq!(*navigator.visited.lock(), vec![LOGIN_PATH.to_string()]);
    }

    #[test]
    fn test_remember_user_roundtrip() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(&storage);
        assert!(store.last_user().unwrap().is_none());

        let user = User {
            id: "u1".into(),
            user_name: Some("ana".into()),
            first_name: "Ana".into(),
            middle_name: None,
            last_name: "López".into(),
            mother_maiden_name: None,
            date_of_birth: "1990-04-01".into(),
            email: "ana@example.com".into(),
            hashed_password: String::new(),
            role_id: "r1".into(),
            role: None,
        };
        store.remember_user(&user).unwrap();
        assert_eq!(store.last_user().unwrap(), Some(user));
    }
}
