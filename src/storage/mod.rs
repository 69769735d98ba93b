pub mod backup;
pub mod json_backend;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Key-value persistence collaborator the ledger writes through to.
///
/// Values are opaque strings; the ledger stores its JSON array under one key.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing has been saved under `key` yet.
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

pub use backup::{BackupDocument, BACKUP_VERSION};
pub use json_backend::{JsonFileStore, MemoryStore};
