//! File-backed state store adapter.
//!
//! Persists each namespace as one JSON object file under a root directory,
//! e.g. `<root>/app_prefs.json`. Namespace files are read and written whole;
//! an internal mutex serialises read-modify-write cycles within the process,
//! and concurrent writers from other processes are last-write-wins, matching
//! the per-key atomicity the lifecycle components assume.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;

use crate::traits::{StateStore, StoreError};

type NamespaceMap = BTreeMap<String, Value>;

/// File-backed store: one JSON object file per namespace.
#[derive(Debug)]
pub struct FileStateStore {
    root: PathBuf,
    /// Serialises read-modify-write cycles on namespace files.
    write_guard: Mutex<()>,
}

impl FileStateStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_guard: Mutex::new(()),
        }
    }

    /// Create a store under the platform data directory, e.g.
    /// `~/.local/share/<app_name>/state` on Linux.
    ///
    /// Returns `None` if no data directory can be determined for this user.
    pub fn for_app(app_name: &str) -> Option<Self> {
        let base = dirs::data_dir().or_else(dirs::home_dir)?;
        Some(Self::new(base.join(app_name).join("state")))
    }

    /// The directory namespace files live in.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn namespace_path(&self, namespace: &str) -> PathBuf {
        self.root.join(format!("{namespace}.json"))
    }

    /// Load a namespace file. A missing file is an empty namespace.
    fn read_namespace(&self, namespace: &str) -> Result<NamespaceMap, StoreError> {
        let path = self.namespace_path(namespace);
        if !path.exists() {
            return Ok(NamespaceMap::new());
        }

        let file = File::open(&path).map_err(|e| StoreError::ReadFailed {
            namespace: namespace.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::ReadFailed {
            namespace: namespace.to_string(),
            message: e.to_string(),
        })
    }

    fn write_namespace(&self, namespace: &str, map: &NamespaceMap) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::WriteFailed {
            namespace: namespace.to_string(),
            message: e.to_string(),
        })?;

        let path = self.namespace_path(namespace);
        let file = File::create(&path).map_err(|e| StoreError::WriteFailed {
            namespace: namespace.to_string(),
            message: e.to_string(),
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, map).map_err(|e| StoreError::WriteFailed {
            namespace: namespace.to_string(),
            message: e.to_string(),
        })?;

        writer.flush().map_err(|e| StoreError::WriteFailed {
            namespace: namespace.to_string(),
            message: e.to_string(),
        })
    }
}

impl StateStore for FileStateStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_namespace(namespace)?.remove(key))
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_namespace(namespace)?;
        map.insert(key.to_string(), value);
        self.write_namespace(namespace, &map)
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_namespace(namespace)?;
        if map.remove(key).is_some() {
            self.write_namespace(namespace, &map)?;
        }
        Ok(())
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.read_namespace(namespace)?.into_keys().collect())
    }

    fn clear_namespace(&self, namespace: &str) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.namespace_path(namespace);
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path).map_err(|e| StoreError::ClearFailed {
            namespace: namespace.to_string(),
            message: e.to_string(),
        })
    }
}
