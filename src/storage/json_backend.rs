use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::{core::utils::ensure_dir, errors::LedgerError};

use super::{KeyValueStore, Result};

const VALUE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each key as `<root>/<key>.json`, replacing files atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Process-local store, used by tests and embedders without a disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.write() {
            values.insert(key.to_string(), value.into());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| LedgerError::Persistence("memory store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| LedgerError::Persistence("memory store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Writes a whole text file through a temporary sibling and a rename.
pub fn write_text_file(path: &Path, contents: &str) -> Result<()> {
    let tmp = tmp_path(path);
    write_atomic(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_roundtrips_values() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path().join("data")).expect("file store");
        assert_eq!(store.load("transactions").unwrap(), None);
        store.save("transactions", "[]").expect("save");
        assert_eq!(store.load("transactions").unwrap().as_deref(), Some("[]"));
        assert!(store.path_for("transactions").ends_with("transactions.json"));
    }

    #[test]
    fn save_leaves_no_temporary_file_behind() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path()).expect("file store");
        store.save("transactions", "[1]").expect("save");
        let tmp = tmp_path(&store.path_for("transactions"));
        assert!(!tmp.exists());
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path()).expect("file store");
        assert!(store.path_for("../Household Ledger").ends_with("___household_ledger.json"));
        assert!(store.path_for("  ").ends_with("store.json"));
    }

    #[test]
    fn memory_store_overwrites_values() {
        let store = MemoryStore::with_value("k", "old");
        store.save("k", "new").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("new"));
        assert_eq!(store.load("other").unwrap(), None);
    }
}
