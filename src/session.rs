//! Durable session state: tokens and the last authenticated user.
//!
//! The [`SessionStore`] is the sole read/write gateway for the two tokens.
//! Components never touch storage directly; they hold a shared handle and
//! observe authentication changes through [`SessionStore::subscribe`].

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tokio::sync::watch;
use tracing::warn;

use crate::config::SessionConfig;
use crate::models::user::LoginResponse;

#[cfg(test)]
use mockall::automock;

/// Key/value storage seam, the durable analog of browser local storage.
///
/// Implementations must tolerate concurrent callers; `SessionStore` performs
/// no locking of its own.
#[cfg_attr(test, automock)]
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// File-backed storage: one JSON object per file, keys as members.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> io::Result<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e),
        }
    }

    fn persist(&self, map: &HashMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, raw)
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.load()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.persist(&map)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.persist(&map)?;
        }
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let map = self.map.lock().unwrap_or_else(|e| e.into_inner());
        Ok(map.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        let mut map = self.map.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut map = self.map.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(key);
        Ok(())
    }
}

/// Single source of truth for the access/refresh token pair and the last
/// authenticated user snapshot.
///
/// Storage failures are logged and treated as "no value"; none of these
/// methods fail. Presence of an access token is the only authentication
/// check performed client-side; expiry is left to the backend's 401.
pub struct SessionStore {
    backend: Box<dyn StorageBackend>,
    access_key: String,
    refresh_key: String,
    user_key: String,
    authenticated: watch::Sender<bool>,
}

impl SessionStore {
    pub fn new(backend: Box<dyn StorageBackend>, config: &SessionConfig) -> Self {
        let store = Self {
            backend,
            access_key: config.access_token_key.clone(),
            refresh_key: config.refresh_token_key.clone(),
            user_key: config.user_key.clone(),
            authenticated: watch::Sender::new(false),
        };
        store.publish();
        store
    }

    /// Store backed by the configured JSON file.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(Box::new(FileStorage::new(&config.storage_path)), config)
    }

    /// Store that forgets everything when dropped.
    pub fn in_memory(config: &SessionConfig) -> Self {
        Self::new(Box::new(MemoryStorage::new()), config)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read '{}' from session storage: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.backend.write(key, value) {
            warn!("Failed to write '{}' to session storage: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!("Failed to remove '{}' from session storage: {}", key, e);
        }
    }

    /// Persist both tokens. No validation of token shape is performed.
    pub fn save_tokens(&self, access: &str, refresh: &str) {
        self.write(&self.access_key, access);
        self.write(&self.refresh_key, refresh);
        self.publish();
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(&self.access_key)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(&self.refresh_key)
    }

    /// Remove both token entries. Idempotent.
    pub fn clear(&self) {
        self.remove(&self.access_key);
        self.remove(&self.refresh_key);
        self.publish();
    }

    /// Presence check only: does not verify the token is unexpired or
    /// well-formed. That check is deferred to the backend's 401.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Mirror the authenticated user into storage for restart survival.
    pub fn save_user(&self, user: &LoginResponse) {
        match serde_json::to_string(user) {
            Ok(raw) => self.write(&self.user_key, &raw),
            Err(e) => warn!("Failed to serialize user snapshot: {}", e),
        }
    }

    pub fn stored_user(&self) -> Option<LoginResponse> {
        let raw = self.read(&self.user_key)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Discarding malformed user snapshot: {}", e);
                None
            }
        }
    }

    pub fn clear_user(&self) {
        self.remove(&self.user_key);
    }

    /// Watch receiver over the authenticated flag. Every token mutation
    /// republishes the current value.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    fn publish(&self) {
        self.authenticated.send_replace(self.is_authenticated());
    }
}
