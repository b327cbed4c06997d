//! Session credential storage: two string slots under fixed keys.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::errors::ClientError;

/// Key of the access credential slot.
pub const ACCESS_TOKEN: &str = "access_token";

/// Key of the refresh credential slot.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Key-value persistence for session credentials.
///
/// The guard and the dashboard fetcher only read from it. Login and logout
/// flows own the writes.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;

    fn remove(&self, key: &str) -> Result<(), ClientError>;

    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN)
    }

    /// Drop both credentials, as a logout does.
    fn clear(&self) -> Result<(), ClientError> {
        self.remove(ACCESS_TOKEN)?;
        self.remove(REFRESH_TOKEN)
    }
}

/// Process-local store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slots: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an access credential.
    pub fn with_access_token(token: &str) -> Self {
        let store = Self::new();
        store
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ACCESS_TOKEN.to_string(), token.to_string());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk.
///
/// The file is re-read on every access so a login performed by another
/// process is picked up on the next guard check.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(ClientError::Storage(format!(
                    "reading {}: {e}",
                    self.path.display()
                )))
            }
        };
        serde_json::from_str(&raw).map_err(|e| {
            ClientError::Storage(format!("parsing {}: {e}", self.path.display()))
        })
    }

    fn save(&self, slots: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ClientError::Storage(format!("creating {}: {e}", parent.display()))
            })?;
        }
        let body = serde_json::to_string_pretty(slots)
            .map_err(|e| ClientError::Storage(format!("encoding session: {e}")))?;
        fs::write(&self.path, body)
            .map_err(|e| ClientError::Storage(format!("writing {}: {e}", self.path.display())))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut slots) => slots.remove(key),
            Err(e) => {
                tracing::warn!(error = %e, "Session file unreadable, treating slot as empty");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut slots = self.load().unwrap_or_default();
        slots.insert(key.to_string(), value.to_string());
        self.save(&slots)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut slots = self.load().unwrap_or_default();
        if slots.remove(key).is_some() {
            self.save(&slots)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_slots() {
        let store = MemorySessionStore::new();
        assert!(store.access_token().is_none());

        store.set(ACCESS_TOKEN, "a").unwrap();
        store.set(REFRESH_TOKEN, "r").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("a"));
        assert_eq!(store.refresh_token().as_deref(), Some("r"));

        store.set(ACCESS_TOKEN, "b").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("b"));

        store.clear().unwrap();
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert!(store.access_token().is_none());
        store.remove(ACCESS_TOKEN).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileSessionStore::new(&path).set(ACCESS_TOKEN, "tok").unwrap();
        FileSessionStore::new(&path).set(REFRESH_TOKEN, "ref").unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.access_token().as_deref(), Some("tok"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("ref"));

        reopened.clear().unwrap();
        assert!(FileSessionStore::new(&path).access_token().is_none());
    }

    #[test]
    fn file_store_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.access_token().is_none());

        store.set(ACCESS_TOKEN, "fresh").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("fresh"));
    }
}
