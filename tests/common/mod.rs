#![allow(dead_code)]

use std::path::PathBuf;

use cashflow_core::{NewTransaction, Transaction, TransactionKind};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Planned record with a deterministic creation timestamp.
pub fn planned(kind: TransactionKind, amount: Decimal, on: NaiveDate) -> Transaction {
    build(NewTransaction::new("planned", amount, on, kind), 0)
}

pub fn completed(
    kind: TransactionKind,
    amount: Decimal,
    on: NaiveDate,
    completed_on: NaiveDate,
    completed_amount: Decimal,
) -> Transaction {
    let mut draft = NewTransaction::new("completed", amount, on, kind).completed();
    draft.completed_date = Some(completed_on);
    draft.completed_amount = Some(completed_amount);
    build(draft, 1)
}

fn build(draft: NewTransaction, seconds: i64) -> Transaction {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap() + Duration::seconds(seconds);
    Transaction::from_draft(draft, created_at).unwrap()
}

/// Temporary directory holding a store path that does not exist yet.
pub fn temp_store() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("transactions.json");
    (dir, path)
}
