//! Ledger orchestration, services, and filesystem helpers.

pub mod ledger_manager;
pub mod services;
pub mod utils;

pub use ledger_manager::{LedgerManager, DEFAULT_STORAGE_KEY};
