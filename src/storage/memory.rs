//! In-memory storage, used by tests and ephemeral shells

use super::KeyValueStore;
use crate::error::{PortalError, PortalResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// Map-backed store with no persistence
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from key/value pairs
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: RwLock::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.items.read().is_ok_and(|items| items.contains_key(key))
    }
}

fn poisoned() -> PortalError {
    PortalError::Storage("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> PortalResult<Option<String>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> PortalResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> PortalResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("token").unwrap(), None);

        store.set_item("token", "abc").unwrap();
        assert_eq!(store.get_item("token").unwrap().as_deref(), Some("abc"));

        store.remove_item("token").unwrap();
        assert!(!store.contains("token"));
        // Removing again is fine
        store.remove_item("token").unwrap();
    }

    #[test]
    fn seeded_items() {
        let store = MemoryStore::with_items([("locale", "en")]);
        assert_eq!(store.get_item("locale").unwrap().as_deref(), Some("en"));
    }
}
