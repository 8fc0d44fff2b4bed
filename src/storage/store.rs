use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

/// String-keyed blob store backing the persisted snapshot: independent
/// JSON values under well-known keys.
///
/// `write_batch` commits all entries together or not at all; the services
/// rely on this to keep balance updates and their transaction records in
/// the same snapshot.
pub trait SnapshotStore {
    fn read(&self, key: &str) -> Result<Option<Value>>;
    fn write_batch(&mut self, entries: Vec<(&str, Option<Value>)>) -> Result<()>;
}

/// File-backed store: the whole snapshot lives in one JSON object file,
/// keys mapping to their blobs. Writes go through a temp file and rename
/// so a commit is all-or-nothing.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read snapshot {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("snapshot {} is not valid JSON", self.path.display()))
    }
}

impl SnapshotStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load_map()?.remove(key))
    }

    fn write_batch(&mut self, entries: Vec<(&str, Option<Value>)>) -> Result<()> {
        let mut map = self.load_map()?;
        for (key, value) in entries {
            match value {
                Some(value) => {
                    map.insert(key.to_string(), value);
                }
                None => {
                    map.remove(key);
                }
            }
        }

        let serialized = serde_json::to_string_pretty(&map)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized)
            .with_context(|| format!("failed to write snapshot {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to commit snapshot {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    map: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.map.get(key).cloned())
    }

    fn write_batch(&mut self, entries: Vec<(&str, Option<Value>)>) -> Result<()> {
        for (key, value) in entries {
            match value {
                Some(value) => {
                    self.map.insert(key.to_string(), value);
                }
                None => {
                    self.map.remove(key);
                }
            }
        }
        Ok(())
    }
}
