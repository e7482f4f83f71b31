use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{sort_for_listing, TransactionStore};
use crate::{
    errors::{CashflowError, Result},
    ledger::{NewTransaction, Transaction, TransactionPatch},
};

/// Volatile store, also the working set behind the JSON backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransactionStore {
    transactions: Vec<Transaction>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(mut transactions: Vec<Transaction>) -> Self {
        sort_for_listing(&mut transactions);
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

    fn position(&self, id: Uuid) -> Result<usize> {
        self.transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(CashflowError::TransactionNotFound(id))
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn list(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    fn create(&mut self, draft: NewTransaction) -> Result<Transaction> {
        let txn = Transaction::from_draft(draft, Utc::now())?;
        info!(id = %txn.id, kind = txn.kind.label(), "transaction created");
        self.transactions.push(txn.clone());
        sort_for_listing(&mut self.transactions);
        Ok(txn)
    }

    fn update(&mut self, id: Uuid, patch: TransactionPatch) -> Result<Transaction> {
        let idx = self.position(id)?;
        let txn = &mut self.transactions[idx];
        txn.apply(patch)?;
        let updated = txn.clone();
        sort_for_listing(&mut self.transactions);
        info!(%id, completed = updated.is_completed, "transaction updated");
        Ok(updated)
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        let idx = self.position(id)?;
        self.transactions.remove(idx);
        info!(%id, "transaction deleted");
        Ok(())
    }
}
