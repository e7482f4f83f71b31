//! Transaction model, pay-cycle windows, and balance projection.

pub mod period;
pub mod projection;
pub mod summary;
pub mod transaction;

pub use period::{compute_period_window, PeriodCalculator, PeriodWindow};
pub use projection::{
    opening_balance, project_daily_balances, BalanceProjector, DailyBalance, EmptyHistory,
};
pub use summary::{split_by_status, summarize, CashflowSummary};
pub use transaction::{
    Effective, NewTransaction, Transaction, TransactionKind, TransactionPatch,
};
