//! The session store.
//!
//! [`SessionStore`] is the only writable copy of the session. It is an
//! explicitly constructed handle (cheap to clone, shared through `Arc`)
//! rather than a global, so every test can build an isolated instance.
//!
//! Writers: `login`, `logout`, `update_user`, and the HTTP client's 401
//! path (which calls `logout`). Everything else reads.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::persistence::{MemorySessionPersistence, SessionPersistence};
use crate::{Session, User};

#[derive(Default)]
struct StoreState {
    session: Session,
    is_loading: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<StoreState>>,
    persistence: Arc<dyn SessionPersistence>,
    /// Serializes storage writes. Held without the state lock.
    io: Arc<Mutex<()>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("SessionStore")
            .field("is_authenticated", &state.session.is_authenticated)
            .field("is_loading", &state.is_loading)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates an anonymous store without reading persisted state.
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            persistence,
            io: Arc::default(),
        }
    }

    /// Creates a store from the persisted session.
    ///
    /// Unreadable storage is logged and treated as anonymous.
    pub fn restore(persistence: Arc<dyn SessionPersistence>) -> Self {
        let session = match persistence.load() {
            Ok(Some(session)) if session.is_authenticated && session.token.is_some() => {
                info!("Restored persisted session");
                session
            }
            Ok(_) => Session::anonymous(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session, starting anonymous");
                Session::anonymous()
            }
        };

        Self {
            state: Arc::new(RwLock::new(StoreState {
                session,
                is_loading: false,
            })),
            persistence,
            io: Arc::default(),
        }
    }

    /// Anonymous store backed by memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionPersistence::new()))
    }

    pub fn login(&self, user: User, token: impl Into<String>) {
        let user_id = user.id.clone();
        self.write().session = Session::authenticated(user, token.into());
        self.persist();
        info!(user_id = %user_id, "Signed in");
    }

    /// Clears the session. Calling it while anonymous is harmless.
    pub fn logout(&self) {
        let was_authenticated = {
            let mut state = self.write();
            std::mem::replace(&mut state.session, Session::anonymous()).is_authenticated
        };
        self.persist();
        if was_authenticated {
            info!("Signed out");
        }
    }

    /// Shallow-merges `patch` into the current user.
    ///
    /// Returns `false` (and changes nothing) when anonymous or when the
    /// merged record is invalid.
    pub fn update_user(&self, patch: &Value) -> bool {
        {
            let mut state = self.write();
            if !state.session.is_authenticated {
                debug!("update_user ignored: no active session");
                return false;
            }
            let Some(merged) = state.session.user.as_ref().and_then(|u| u.merged(patch)) else {
                warn!("update_user ignored: merged user is invalid");
                return false;
            };
            state.session.user = Some(merged);
        }
        self.persist();
        true
    }

    pub fn set_loading(&self, loading: bool) {
        self.write().is_loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.read().session.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().session.token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().session.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().session.is_authenticated
    }

    /// Writes the current session to storage, or clears storage when
    /// anonymous. The snapshot is taken under the I/O lock, so the last
    /// write always reflects the latest session.
    fn persist(&self) {
        let _io = self.io.lock().unwrap_or_else(PoisonError::into_inner);
        let session = self.session();
        if session.is_authenticated {
            if let Err(e) = self.persistence.save(&session) {
                warn!(error = %e, "Failed to persist session");
            }
        } else if let Err(e) = self.persistence.clear() {
            warn!(error = %e, "Failed to clear persisted session");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PersistError;
    use serde_json::json;
    use std::sync::OnceLock;

    fn user() -> User {
        User {
            id: "u-1".into(),
            name: "Ana".into(),
            email: "ana@colegio.edu".into(),
            role: "admin".into(),
            ..User::default()
        }
    }

    #[test]
    fn test_login_logout_cycle() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());

        store.login(user(), "tok");
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.user().unwrap().name, "Ana");

        store.logout();
        assert_eq!(store.session(), Session::anonymous());
    }

    #[test]
    fn test_update_user_merges() {
        let store = SessionStore::in_memory();
        store.login(user(), "tok");
        assert!(store.update_user(&json!({ "name": "Ana Torres" })));
        let u = store.user().unwrap();
        assert_eq!(u.name, "Ana Torres");
        assert_eq!(u.email, "ana@colegio.edu");
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_update_user_while_anonymous_is_noop() {
        let store = SessionStore::in_memory();
        assert!(!store.update_user(&json!({ "name": "x" })));
        assert!(store.user().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_loading_is_orthogonal_and_not_persisted() {
        let storage = MemorySessionPersistence::new();
        let store = SessionStore::new(Arc::new(storage.clone()));
        store.set_loading(true);
        store.login(user(), "tok");
        assert!(store.is_loading());
        assert!(store.is_authenticated());
        assert!(!storage.stored().unwrap().contains("loading"));
    }

    #[test]
    fn test_restore_uses_persisted_copy() {
        let storage = MemorySessionPersistence::new();
        {
            let store = SessionStore::new(Arc::new(storage.clone()));
            store.login(user(), "tok");
        }

        let restored = SessionStore::restore(Arc::new(storage.clone()));
        assert!(restored.is_authenticated());
        assert_eq!(restored.token().as_deref(), Some("tok"));

        restored.logout();
        assert!(storage.stored().is_none());
        let after_logout = SessionStore::restore(Arc::new(storage));
        assert!(!after_logout.is_authenticated());
    }

    /// Storage that reads the store back while saving.
    #[derive(Default)]
    struct ReadingPersistence {
        store: OnceLock<SessionStore>,
        seen: Mutex<Vec<Option<String>>>,
    }

    impl SessionPersistence for ReadingPersistence {
        fn load(&self) -> Result<Option<Session>, PersistError> {
            Ok(None)
        }

        fn save(&self, _session: &Session) -> Result<(), PersistError> {
            if let Some(store) = self.store.get() {
                self.seen.lock().unwrap().push(store.token());
            }
            Ok(())
        }

        fn clear(&self) -> Result<(), PersistError> {
            self.save(&Session::anonymous())
        }
    }

    #[test]
    fn test_storage_runs_outside_the_state_lock() {
        let storage = Arc::new(ReadingPersistence::default());
        let store = SessionStore::new(storage.clone());
        assert!(storage.store.set(store.clone()).is_ok());

        store.login(user(), "tok");
        assert!(store.update_user(&json!({ "name": "Ana Torres" })));
        store.logout();

        let seen = storage.seen.lock().unwrap().clone();
        assert_eq!(seen, vec![Some("tok".to_string()), Some("tok".to_string()), None]);
    }
}
