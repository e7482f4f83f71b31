//! Best-effort completion of planned transactions whose date has passed.

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{errors::Result, ledger::Transaction, storage::TransactionStore};

#[derive(Debug, Clone)]
pub struct SweepFailure {
    pub id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub completed: Vec<Uuid>,
    pub failures: Vec<SweepFailure>,
    /// Store contents reloaded after the sweep.
    pub transactions: Vec<Transaction>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Marks every planned transaction dated before `today` as completed on `today`
/// with its planned amount.
///
/// Items are processed one by one; a failing item is logged and skipped, never
/// retried. Only failing to read the store aborts the sweep.
pub fn auto_complete_past_due(
    store: &mut dyn TransactionStore,
    today: NaiveDate,
) -> Result<SweepReport> {
    let due: Vec<Transaction> = store
        .list()?
        .into_iter()
        .filter(|txn| !txn.is_completed && txn.effective_date() < today)
        .collect();

    let mut report = SweepReport::default();
    for txn in due {
        match store.mark_completed(txn.id, today, txn.amount) {
            Ok(_) => report.completed.push(txn.id),
            Err(err) => {
                warn!(id = %txn.id, error = %err, "auto-complete failed, skipping");
                report.failures.push(SweepFailure {
                    id: txn.id,
                    reason: err.to_string(),
                });
            }
        }
    }
    info!(
        completed = report.completed.len(),
        failed = report.failures.len(),
        %today,
        "auto-complete sweep finished"
    );
    report.transactions = store.list()?;
    Ok(report)
}
