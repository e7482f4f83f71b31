//! Day-by-day running balance over a window, seeded by all earlier history.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Transaction;
use crate::{
    currency::{format_short_date, LocaleConfig},
    errors::{CashflowError, Result},
};

/// Balance at the close of one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub balance: Decimal,
    pub label: String,
}

/// What to return when there are no transactions at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyHistory {
    /// No history means no series.
    #[default]
    Empty,
    /// One zero entry per day of the window.
    ZeroFilled,
}

#[derive(Debug, Clone, Default)]
pub struct BalanceProjector {
    locale: LocaleConfig,
    empty_history: EmptyHistory,
}

impl BalanceProjector {
    pub fn new(locale: LocaleConfig, empty_history: EmptyHistory) -> Self {
        Self {
            locale,
            empty_history,
        }
    }

    pub fn empty_history(&self) -> EmptyHistory {
        self.empty_history
    }

    /// One entry per day in `[window_start, window_end]`, ascending.
    ///
    /// Transactions dated before the window fold into the opening balance;
    /// those after `window_end` are ignored. Same-day order is irrelevant.
    pub fn project(
        &self,
        transactions: &[Transaction],
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<Vec<DailyBalance>> {
        if window_end < window_start {
            return Err(CashflowError::InvalidInput(format!(
                "window end {window_end} is before start {window_start}"
            )));
        }
        if transactions.is_empty() && self.empty_history == EmptyHistory::Empty {
            debug!(%window_start, %window_end, "no transactions, empty projection");
            return Ok(Vec::new());
        }

        let mut running = Decimal::ZERO;
        let mut per_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for txn in transactions {
            let date = txn.effective_date();
            if date < window_start {
                running += txn.signed_amount();
            } else if date <= window_end {
                *per_day.entry(date).or_insert(Decimal::ZERO) += txn.signed_amount();
            }
        }
        debug!(
            transactions = transactions.len(),
            active_days = per_day.len(),
            opening = %running,
            "projecting daily balances"
        );

        let series = window_start
            .iter_days()
            .take_while(|day| *day <= window_end)
            .map(|day| {
                if let Some(delta) = per_day.get(&day) {
                    running += *delta;
                }
                DailyBalance {
                    date: day,
                    balance: running,
                    label: format_short_date(&self.locale, day),
                }
            })
            .collect();
        Ok(series)
    }
}

/// Projection with the default locale and the empty-history policy.
pub fn project_daily_balances(
    transactions: &[Transaction],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<DailyBalance>> {
    BalanceProjector::default().project(transactions, window_start, window_end)
}

/// Signed total of every transaction whose effective date is strictly before `before`.
pub fn opening_balance(transactions: &[Transaction], before: NaiveDate) -> Decimal {
    transactions
        .iter()
        .filter(|txn| txn.effective_date() < before)
        .map(Transaction::signed_amount)
        .sum()
}
