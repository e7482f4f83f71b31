use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DailyBalance, Transaction, TransactionKind};

/// Headline figures shown above the balance chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashflowSummary {
    /// Balance on `today` if the series covers it, else the closing balance.
    pub today_balance: Decimal,
    pub closing_balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub planned: usize,
    pub completed: usize,
}

pub fn summarize(
    transactions: &[Transaction],
    series: &[DailyBalance],
    today: NaiveDate,
) -> CashflowSummary {
    let closing_balance = series.last().map(|day| day.balance).unwrap_or_default();
    let today_balance = series
        .iter()
        .find(|day| day.date == today)
        .map(|day| day.balance)
        .unwrap_or(closing_balance);
    let total_of = |kind: TransactionKind| -> Decimal {
        transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .map(|txn| txn.effective_amount().abs())
            .sum()
    };
    let completed = transactions.iter().filter(|txn| txn.is_completed).count();
    CashflowSummary {
        today_balance,
        closing_balance,
        total_income: total_of(TransactionKind::Income),
        total_expense: total_of(TransactionKind::Expense),
        planned: transactions.len() - completed,
        completed,
    }
}

/// Planned transactions and completed ones, each keeping the input order.
pub fn split_by_status(transactions: &[Transaction]) -> (Vec<&Transaction>, Vec<&Transaction>) {
    transactions.iter().partition(|txn| !txn.is_completed)
}
