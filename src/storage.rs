//! Persistent key-value storage for display preferences.
//!
//! Native builds keep one file per key under the user's data directory,
//! wasm builds use the browser's `localStorage`, and tests use the shared
//! in-memory store.

use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, io::ErrorKind, path::PathBuf};

pub trait PreferenceStore {
    /// `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ============================================
// In-memory store
// ============================================

/// Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.entries.lock() {
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .lock()
            .map(|map| map.clone())
            .unwrap_or_default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================
// File store (native platforms)
// ============================================

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Preferences directory under the user's local data dir.
    pub fn user_default() -> Self {
        if let Some(data_dir) = dirs::data_local_dir() {
            return Self::new(data_dir.join("folio").join("preferences"));
        }
        Self::new(PathBuf::from("cache").join("preferences"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.txt", sanitize_key(key)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Sanitize storage key for filesystem use
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

// ============================================
// Web storage (wasm)
// ============================================

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct WebStore;

#[cfg(target_arch = "wasm32")]
impl WebStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for WebStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Web(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Web(format!("{e:?}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = FileStore;

#[cfg(target_arch = "wasm32")]
pub type PlatformStore = WebStore;

/// The store the page shell uses on this platform.
pub fn platform_store() -> PlatformStore {
    #[cfg(not(target_arch = "wasm32"))]
    {
        FileStore::user_default()
    }
    #[cfg(target_arch = "wasm32")]
    {
        WebStore
    }
}
