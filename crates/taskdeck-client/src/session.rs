//! Explicit session service.
//!
//! Created at app start, torn down at logout. Replaces ambient module-level
//! auth state: every component that needs the token holds an
//! `Arc<SessionStore>`, and all durable access goes through [`Storage`].

use std::sync::{Arc, Mutex};

use taskdeck_types::{Session, User};
use tracing::debug;

use crate::storage::Storage;

pub const AUTH_STORAGE_KEY: &str = "auth-storage";

pub struct SessionStore {
    storage: Arc<dyn Storage>,
    session: Mutex<Session>,
}

impl SessionStore {
    /// New store with whatever `auth-storage` holds already hydrated.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let store = Self {
            storage,
            session: Mutex::new(Session::default()),
        };
        store.hydrate();
        store
    }

    /// Reload the persisted session. A corrupt or missing record hydrates
    /// to the signed-out state.
    pub fn hydrate(&self) {
        let persisted = self
            .storage
            .get(AUTH_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<Session>(&raw).ok())
            .unwrap_or_default();
        *self.session.lock().unwrap() = persisted;
    }

    /// Current token, falling back to durable storage when the in-memory
    /// value is unset (covers reads before hydration completes).
    pub fn token(&self) -> Option<String> {
        if let Some(token) = self.session.lock().unwrap().token.clone() {
            return Some(token);
        }
        self.storage
            .get(AUTH_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<Session>(&raw).ok())
            .and_then(|s| s.token)
    }

    pub fn user(&self) -> Option<User> {
        self.session.lock().unwrap().user.clone()
    }

    pub fn set_token(&self, token: &str) {
        let mut session = self.session.lock().unwrap();
        session.token = Some(token.to_string());
        self.persist(&session);
    }

    pub fn set_user(&self, user: User) {
        let mut session = self.session.lock().unwrap();
        session.user = Some(user);
        self.persist(&session);
    }

    /// Drop the token but keep the user record. Called by the HTTP wrapper
    /// on any 401 so no stale invalid token is ever left in place.
    pub fn clear_token(&self) {
        debug!("clearing session token");
        let mut session = self.session.lock().unwrap();
        session.token = None;
        self.persist(&session);
    }

    /// Full sign-out: token and user both cleared, in memory and on disk.
    pub fn logout(&self) {
        debug!("session logout");
        let mut session = self.session.lock().unwrap();
        *session = Session::default();
        self.persist(&session);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn persist(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(raw) => self.storage.set(AUTH_STORAGE_KEY, &raw),
            Err(e) => tracing::warn!("failed to serialize session: {}", e),
        }
    }
}
