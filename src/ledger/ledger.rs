use serde::{Deserialize, Serialize};

use super::transaction::{NewTransaction, Transaction, TransactionId, TransactionPatch};

/// In-memory collection of transactions.
///
/// Insertion order carries no meaning; every consumer that needs order sorts
/// by date. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    pub fn add(&mut self, candidate: NewTransaction) -> TransactionId {
        let txn = Transaction::create(candidate);
        let id = txn.id().clone();
        self.transactions.push(txn);
        id
    }

    /// Adds a batch. Candidates are built before anything is appended.
    pub fn add_many(&mut self, candidates: Vec<NewTransaction>) -> Vec<TransactionId> {
        let created: Vec<Transaction> = candidates.into_iter().map(Transaction::create).collect();
        let ids = created.iter().map(|txn| txn.id().clone()).collect();
        self.transactions.extend(created);
        ids
    }

    /// Applies `patch` to the matching transaction. Returns `false` when the id is unknown.
    pub fn edit(&mut self, id: &TransactionId, patch: TransactionPatch) -> bool {
        match self.transactions.iter_mut().find(|txn| txn.id() == id) {
            Some(txn) => {
                txn.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id() == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ledger_with_two() -> (Ledger, TransactionId, TransactionId) {
        let mut ledger = Ledger::new();
        let cafe = ledger.add(NewTransaction::expense("2024-01-05", "Cafe", 250));
        let salary = ledger.add(NewTransaction::income("2024-01-20", "", 1_050));
        (ledger, cafe, salary)
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut ledger = Ledger::new();
        let ids = ledger.add_many(vec![
            NewTransaction::expense("2024-01-01", "A", 100),
            NewTransaction::expense("2024-01-01", "A", 100),
            NewTransaction::income("2024-01-02", "B", 100),
        ]);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn edit_unknown_id_leaves_ledger_unchanged() {
        let (mut ledger, _, _) = ledger_with_two();
        let before = ledger.clone();
        let changed = ledger.edit(
            &TransactionId::from("missing"),
            TransactionPatch {
                amount: Some(9_900),
                ..TransactionPatch::default()
            },
        );
        assert!(!changed);
        assert_eq!(ledger, before);
    }

    #[test]
    fn remove_deletes_only_matching_transaction() {
        let (mut ledger, cafe, salary) = ledger_with_two();
        let removed = ledger.remove(&cafe).expect("cafe exists");
        assert_eq!(removed.store(), "Cafe");
        assert!(ledger.transaction(&cafe).is_none());
        assert!(ledger.transaction(&salary).is_some());
        assert!(ledger.remove(&cafe).is_none());
    }

    #[test]
    fn serializes_as_plain_array() {
        let (ledger, _, _) = ledger_with_two();
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().map(Vec::len), Some(2));
    }
}
