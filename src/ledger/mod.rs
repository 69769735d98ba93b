//! Ledger domain models: transactions, amount rules, and period buckets.

pub mod amount;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod transaction;

pub use amount::{
    checked_normalize, normalize, signed_amount, within_limit, AMOUNT_STEP, MAX_AMOUNT,
};
pub use ledger::Ledger;
pub use period::{by_month, by_year, months_of, Period};
pub use transaction::{
    NewTransaction, Transaction, TransactionId, TransactionKind, TransactionPatch,
    UNSPECIFIED_STORE,
};
