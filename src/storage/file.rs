//! File-backed storage
//!
//! All keys live in one JSON object file. Every write rewrites the file
//! through a temp file + rename so a crash never leaves a half-written entry.

use super::KeyValueStore;
use crate::error::{PortalError, PortalResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// JSON file store, one object of string values
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`; the file is created on first write
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> PortalResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            PortalError::io(format!("reading storage file {}", self.path.display()), e)
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            PortalError::Storage(format!(
                "storage file {} is not a JSON object of strings: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> PortalResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PortalError::io("creating storage directory", e))?;
        }

        let content = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .map_err(|e| PortalError::io(format!("writing storage file {}", tmp.display()), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp, perms)
                .map_err(|e| PortalError::io("setting storage file permissions", e))?;
        }

        fs::rename(&tmp, &self.path).map_err(|e| {
            PortalError::io(format!("replacing storage file {}", self.path.display()), e)
        })
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> PortalResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| PortalError::Storage("storage lock poisoned".to_string()))?;
        let mut items = self.read_all()?;
        f(&mut items);
        self.write_all(&items)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> PortalResult<()> {
        debug!("storage set {}", key);
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> PortalResult<()> {
        debug!("storage remove {}", key);
        self.update(|items| {
            items.remove(key);
        })
    }
}
