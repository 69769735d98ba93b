#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use kakeibo_core::{
    core::{LedgerManager, DEFAULT_STORAGE_KEY},
    errors::LedgerError,
    ledger::NewTransaction,
    storage::{JsonFileStore, KeyValueStore},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a manager over a file store in a unique directory.
pub fn setup_file_ledger() -> (LedgerManager, PathBuf) {
    let base = temp_base();
    let store = JsonFileStore::new(base.join("data")).expect("create json store");
    let manager =
        LedgerManager::open(Box::new(store), DEFAULT_STORAGE_KEY).expect("open ledger manager");
    (manager, base)
}

pub fn reopen(base: &PathBuf) -> LedgerManager {
    let store = JsonFileStore::new(base.join("data")).expect("create json store");
    LedgerManager::open(Box::new(store), DEFAULT_STORAGE_KEY).expect("reopen ledger manager")
}

/// Accepts reads and rejects every write.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn load(&self, _key: &str) -> Result<Option<String>, LedgerError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), LedgerError> {
        Err(LedgerError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "quota exceeded",
        )))
    }
}

/// January 2024 plus one March expense.
pub fn sample_entries() -> Vec<NewTransaction> {
    vec![
        NewTransaction::expense("2024-01-05", "Cafe", 250),
        NewTransaction::income("2024-01-20", "", 1_050),
        NewTransaction::expense("2024-03-15", "Books", 1_200),
    ]
}
