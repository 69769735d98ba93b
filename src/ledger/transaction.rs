//! Transactions, ingestion candidates, and partial edits.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::amount::{normalize, signed_amount};

/// Label stored when a transaction is created without a store name.
pub const UNSPECIFIED_STORE: &str = "未指定";

/// Opaque identifier assigned by the ledger when a transaction is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of a money movement. Derived from the sign of the stored amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn of_amount(amount: i64) -> Self {
        if amount > 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "income" | "in" | "収入" => Ok(TransactionKind::Income),
            "expense" | "out" | "支出" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

/// A dated income or expense entry.
///
/// The sign of `amount` is the single source of truth for the kind; the
/// `type` tag only exists on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TransactionRecord", from = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    date: String,
    store: String,
    amount: i64,
}

impl Transaction {
    /// Builds a stored transaction from a candidate, assigning a fresh id.
    pub(crate) fn create(candidate: NewTransaction) -> Self {
        Self {
            id: TransactionId::generate(),
            date: candidate.date,
            store: normalize_store(&candidate.store),
            amount: normalize(signed_amount(candidate.amount, candidate.kind)),
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    /// ISO `YYYY-MM-DD` date string.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    /// Signed amount: positive for income, negative for expense.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        TransactionKind::of_amount(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0
    }

    pub(crate) fn apply(&mut self, patch: TransactionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(store) = patch.store {
            self.store = normalize_store(&store);
        }
        self.amount = match (patch.amount, patch.kind) {
            (Some(amount), Some(kind)) => normalize(signed_amount(amount, kind)),
            (Some(amount), None) => normalize(amount),
            (None, Some(kind)) => signed_amount(self.amount, kind),
            (None, None) => self.amount,
        };
    }
}

/// Wire shape shared by persisted ledgers and backup documents.
///
/// Decoding is lenient: absent or `null` fields fall back to defaults and the
/// `type` tag is ignored in favour of the amount sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    store: String,
    #[serde(default, deserialize_with = "null_as_default")]
    amount: i64,
    #[serde(rename = "type", default, skip_deserializing)]
    kind: Option<TransactionKind>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        let kind = Some(txn.kind());
        Self {
            id: txn.id.0,
            date: txn.date,
            store: txn.store,
            amount: txn.amount,
            kind,
        }
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        let id = if record.id.is_empty() {
            TransactionId::generate()
        } else {
            TransactionId(record.id)
        };
        Self {
            id,
            date: record.date,
            store: record.store,
            amount: record.amount,
        }
    }
}

/// A candidate handed to the ledger by a form or an import producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: String,
    #[serde(default)]
    pub store: String,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn new(
        date: impl Into<String>,
        store: impl Into<String>,
        amount: i64,
        kind: TransactionKind,
    ) -> Self {
        Self {
            date: date.into(),
            store: store.into(),
            amount,
            kind,
        }
    }

    pub fn income(date: impl Into<String>, store: impl Into<String>, amount: i64) -> Self {
        Self::new(date, store, amount, TransactionKind::Income)
    }

    pub fn expense(date: impl Into<String>, store: impl Into<String>, amount: i64) -> Self {
        Self::new(date, store, amount, TransactionKind::Expense)
    }
}

/// Fields to replace on an existing transaction. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub date: Option<String>,
    pub store: Option<String>,
    pub amount: Option<i64>,
    pub kind: Option<TransactionKind>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.store.is_none() && self.amount.is_none() && self.kind.is_none()
    }
}

fn normalize_store(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNSPECIFIED_STORE.to_string()
    } else {
        trimmed.to_string()
    }
}
