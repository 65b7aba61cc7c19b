//! JSON file backend
//!
//! Keeps the whole key space in one JSON object on disk. Every write loads
//! the file, applies the change and rewrites it through a temp file + rename,
//! so a crash mid-write leaves the previous contents in place. A file that no
//! longer parses reads as empty and is replaced by the next write.

use crate::storage::{KeyValueStore, StorageResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name used inside the data directory
pub const STORE_FILE: &str = "gatehouse.json";

/// Key-value store persisted as a single JSON object file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (or lazily create) the store file inside `data_dir`
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(STORE_FILE),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    tracing::warn!(
                        path = ?self.path,
                        error = %e,
                        "Store file is corrupt, treating as empty"
                    );
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
