//! Durable key-value slots that favorites are persisted to.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not write storage file")]
    Io(#[from] std::io::Error),
    #[error("could not encode stored value")]
    Encode(#[from] serde_json::Error),
}

/// A string-valued key-value store.
///
/// Reads never fail: a slot that can't be read is reported as absent.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value);
        Ok(())
    }
}

/// Stores every slot in a single JSON object on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    fn read_slots(&self) -> BTreeMap<String, String> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                tracing::debug!(path = ?self.path, "storage file not readable: {}", err);
                return BTreeMap::new();
            },
        };

        match serde_json::from_str(&data) {
            Ok(slots) => slots,
            Err(err) => {
                tracing::debug!(path = ?self.path, "ignoring corrupt storage file: {}", err);
                BTreeMap::new()
            },
        }
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_slots().remove(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut slots = self.read_slots();
        slots.insert(key.to_string(), value);
        let data = serde_json::to_string_pretty(&slots)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}
