use crate::errors::LedgerError;
use crate::ledger::{Ledger, NewTransaction, Transaction, TransactionId, TransactionPatch};
use crate::storage::{backup::BackupDocument, KeyValueStore};

/// Key the ledger is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "transactions";

/// Facade that owns the in-memory ledger and writes it through to storage.
///
/// Every mutation that changes the ledger re-serializes the whole ledger
/// before returning. When the write fails the in-memory change stays applied
/// and the caller receives [`LedgerError::Persistence`].
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn KeyValueStore>,
    key: String,
}

impl LedgerManager {
    /// Loads whatever is stored under `key`; absent data yields an empty ledger.
    pub fn open(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self, LedgerError> {
        let key = key.into();
        let ledger = match storage.load(&key)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Ledger::new(),
        };
        tracing::debug!(key = %key, count = ledger.len(), "ledger opened");
        Ok(Self {
            ledger,
            storage,
            key,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn add(&mut self, candidate: NewTransaction) -> Result<TransactionId, LedgerError> {
        let id = self.ledger.add(candidate);
        tracing::debug!(id = %id, "transaction added");
        self.persist()?;
        Ok(id)
    }

    pub fn add_many(&mut self, candidates: Vec<NewTransaction>) -> Result<Vec<TransactionId>, LedgerError> {
        let ids = self.ledger.add_many(candidates);
        tracing::debug!(count = ids.len(), "transactions added");
        self.persist()?;
        Ok(ids)
    }

    /// Returns `Ok(false)` without writing when `id` is unknown.
    pub fn edit(&mut self, id: &TransactionId, patch: TransactionPatch) -> Result<bool, LedgerError> {
        if !self.ledger.edit(id, patch) {
            tracing::debug!(id = %id, "edit ignored for unknown transaction");
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Returns `Ok(false)` without writing when `id` is unknown.
    pub fn delete(&mut self, id: &TransactionId) -> Result<bool, LedgerError> {
        if self.ledger.remove(id).is_none() {
            tracing::debug!(id = %id, "delete ignored for unknown transaction");
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn load_all(&self) -> Vec<Transaction> {
        self.ledger.transactions().to_vec()
    }

    /// Overwrites the whole ledger. Nothing is merged.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<(), LedgerError> {
        self.ledger.replace_all(transactions);
        self.persist()
    }

    pub fn export_backup(&self) -> BackupDocument {
        BackupDocument::export(&self.ledger)
    }

    /// Replaces the ledger with the contents of backup text.
    ///
    /// Validation happens before anything changes, so a rejected backup
    /// leaves the ledger as it was. Confirming the overwrite is the caller's job.
    pub fn restore_backup(&mut self, text: &str) -> Result<usize, LedgerError> {
        let transactions = BackupDocument::import(text)?;
        let count = transactions.len();
        self.replace_all(transactions)?;
        tracing::info!(count, "ledger restored from backup");
        Ok(count)
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string(&self.ledger)?;
        self.storage.save(&self.key, &json).map_err(|err| {
            tracing::warn!(key = %self.key, error = %err, "ledger write failed");
            match err {
                LedgerError::Persistence(message) => LedgerError::Persistence(message),
                other => LedgerError::Persistence(other.to_string()),
            }
        })
    }
}
