//! Key/value storage port
//!
//! The wizard persists its progress through this small string-keyed
//! interface, so the controller never touches files directly and tests can
//! inject an in-memory store.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::BuybackResult;

use super::file_io::{read_json, write_json_atomic};

/// String key/value store used to persist wizard progress
pub trait KeyValueStore {
    /// Get the value stored under `key`, if any
    fn get(&self, key: &str) -> BuybackResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> BuybackResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> BuybackResult<()>;

    /// Store several entries in one write; either all of them land or none
    fn set_many(&mut self, entries: &[(&str, &str)]) -> BuybackResult<()>;

    /// Remove several keys in one write; either all of them go or none
    fn remove_many(&mut self, keys: &[&str]) -> BuybackResult<()>;
}

/// Store backed by a single JSON object on disk
///
/// The file is re-read on every access and rewritten atomically on every
/// change, so each CLI invocation sees the previous one's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> BuybackResult<BTreeMap<String, String>> {
        read_json(&self.path)
    }

    /// Entries for a write; a corrupt file is replaced rather than blocking progress
    fn entries_for_write(&self) -> BTreeMap<String, String> {
        self.entries().unwrap_or_default()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BuybackResult<Option<String>> {
        Ok(self.entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> BuybackResult<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&mut self, key: &str) -> BuybackResult<()> {
        self.remove_many(&[key])
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> BuybackResult<()> {
        let mut stored = self.entries_for_write();
        for (key, value) in entries {
            stored.insert(key.to_string(), value.to_string());
        }
        write_json_atomic(&self.path, &stored)
    }

    fn remove_many(&mut self, keys: &[&str]) -> BuybackResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut stored = self.entries_for_write();
        for key in keys {
            stored.remove(*key);
        }
        write_json_atomic(&self.path, &stored)
    }
}

/// Volatile store, used by tests and one-off runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> BuybackResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> BuybackResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> BuybackResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> BuybackResult<()> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> BuybackResult<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}
