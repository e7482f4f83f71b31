#![doc(test(attr(deny(warnings))))]

//! Cash-flow core: pay-cycle windows and day-by-day balance projection over
//! planned and realized transactions, plus the stores, configuration, and CLI
//! that sit around them.

pub mod cli;
pub mod clock;
pub mod config;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod sweep;
pub mod utils;

pub use config::{Config, ConfigManager};
pub use errors::{CashflowError, Result};
pub use ledger::{
    compute_period_window, project_daily_balances, summarize, BalanceProjector, DailyBalance,
    EmptyHistory, NewTransaction, PeriodCalculator, PeriodWindow, Transaction, TransactionKind,
    TransactionPatch,
};
pub use storage::{JsonTransactionStore, MemoryTransactionStore, TransactionStore};
pub use sweep::{auto_complete_past_due, SweepReport};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow core tracing initialized.");
    });
}
