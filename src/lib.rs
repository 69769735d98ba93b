#![doc(test(attr(deny(warnings))))]

//! Kakeibo Core records dated income and expense entries and turns them into
//! monthly and yearly totals, running-balance chart series, text reports, and
//! JSON backups.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Kakeibo Core tracing initialized.");
    });
}
