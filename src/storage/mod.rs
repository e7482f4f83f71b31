pub mod json_backend;
pub mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    errors::{CashflowError, Result},
    ledger::{NewTransaction, Transaction, TransactionPatch},
};

/// Create/read/update/delete access to transaction records.
///
/// `list` returns records ordered by planned date, ties broken by creation time.
pub trait TransactionStore: Send + Sync {
    fn list(&self) -> Result<Vec<Transaction>>;
    fn create(&mut self, draft: NewTransaction) -> Result<Transaction>;
    fn update(&mut self, id: Uuid, patch: TransactionPatch) -> Result<Transaction>;
    fn delete(&mut self, id: Uuid) -> Result<()>;

    fn get(&self, id: Uuid) -> Result<Transaction> {
        self.list()?
            .into_iter()
            .find(|txn| txn.id == id)
            .ok_or(CashflowError::TransactionNotFound(id))
    }

    /// Flags the record as completed and records both overrides.
    fn mark_completed(
        &mut self,
        id: Uuid,
        completed_date: NaiveDate,
        completed_amount: Decimal,
    ) -> Result<Transaction> {
        self.update(id, TransactionPatch::completion(completed_date, completed_amount))
    }
}

pub(crate) fn sort_for_listing(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        a.transaction_date
            .cmp(&b.transaction_date)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

pub use json_backend::{JsonTransactionStore, StoreDocument, STORE_SCHEMA_VERSION};
pub use memory::MemoryTransactionStore;
