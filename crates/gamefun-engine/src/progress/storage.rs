use std::collections::HashMap;

use crate::api::error::ProgressError;

/// String key-value backend for persisted progress, shaped after the
/// browser's `localStorage`.
pub trait ProgressStorage {
    fn load(&self, key: &str) -> Result<Option<String>, ProgressError>;

    /// Write `value` under `key`. Must either store the whole value or fail.
    fn save(&mut self, key: &str, value: &str) -> Result<(), ProgressError>;
}

/// In-process storage. Backs tests and hosts without a browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. with state saved by an earlier session.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ProgressStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, ProgressError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), ProgressError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load("k").unwrap(), None);
        storage.save("k", "v1").unwrap();
        storage.save("k", "v2").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v2"));
    }
}
