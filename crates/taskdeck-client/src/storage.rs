//! Durable key/value storage behind the session and notification services.
//!
//! Components never touch raw storage; every durable read or write goes
//! through a service that owns one of these stores.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Filesystem-backed store: one file per key under a base directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are fixed, app-chosen names ("auth-storage", "board_id_<id>");
        // strip separators anyway so a hostile user id cannot escape the dir.
        let safe: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.base.join(safe)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&path, value) {
            tracing::warn!("failed to persist {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_roundtrip() {
        let store = MemoryStorage::new();
        assert!(store.get("auth-storage").is_none());

        store.set("auth-storage", "{\"token\":null}");
        assert_eq!(store.get("auth-storage").as_deref(), Some("{\"token\":null}"));

        store.remove("auth-storage");
        assert!(store.get("auth-storage").is_none());
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path().to_path_buf());

        store.set("board_id_u1", "u1");
        store.set("notification-storage", "{}");

        let reopened = FileStorage::new(dir.path().to_path_buf());
        assert_eq!(reopened.get("board_id_u1").as_deref(), Some("u1"));

        reopened.remove("board_id_u1");
        assert!(reopened.get("board_id_u1").is_none());
        assert_eq!(reopened.get("notification-storage").as_deref(), Some("{}"));
    }

    #[test]
    fn file_storage_sanitizes_separators() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path().to_path_buf());

        store.set("board_id_../../etc", "x");
        assert_eq!(store.get("board_id_../../etc").as_deref(), Some("x"));
        assert!(dir.path().join("board_id_.._.._etc").exists());
    }
}
