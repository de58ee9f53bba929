//! Persistent key-value storage
//!
//! The session layer only needs three primitives, mirroring browser local
//! storage: read a string, write a string, remove a key. Writes are atomic at
//! single-key granularity; nothing spans keys.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::PortalResult;

/// Storage key for the bare auth token
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON user record
pub const USER_KEY: &str = "user";
/// Storage key for the JSON translation dictionary
pub const DICTIONARY_KEY: &str = "dict";
/// Storage key for the active side panel
pub const ACTIVE_PANEL_KEY: &str = "active-panel";
/// Storage key for the UI locale
pub const LOCALE_KEY: &str = "locale";

/// Synchronous string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get_item(&self, key: &str) -> PortalResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> PortalResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> PortalResult<()>;
}
