use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CashflowError, Result};

/// Direction of a transaction; fixed at creation and the only source of sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = CashflowError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(CashflowError::InvalidInput(format!(
                "unknown transaction type `{other}` (expected income or expense)"
            ))),
        }
    }
}

/// A planned or realized money movement as held by a transaction store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub title: String,
    /// Planned magnitude; never negative.
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_amount: Option<Decimal>,
}

/// Realized view of a transaction: overrides when completed, planned values otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effective {
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl Transaction {
    /// Builds a stored record from a validated draft.
    pub fn from_draft(draft: NewTransaction, created_at: DateTime<Utc>) -> Result<Self> {
        draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            created_at,
            title: draft.title.trim().to_string(),
            amount: draft.amount,
            transaction_date: draft.transaction_date,
            kind: draft.kind,
            is_completed: draft.is_completed,
            completed_date: draft.completed_date,
            completed_amount: draft.completed_amount,
        })
    }

    /// The one place where completed overrides are resolved against planned values.
    pub fn effective(&self) -> Effective {
        if !self.is_completed {
            return Effective {
                date: self.transaction_date,
                amount: self.amount,
            };
        }
        Effective {
            date: self.completed_date.unwrap_or(self.transaction_date),
            amount: self.completed_amount.unwrap_or(self.amount),
        }
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective().date
    }

    pub fn effective_amount(&self) -> Decimal {
        self.effective().amount
    }

    /// Contribution to a running balance: `+|amount|` for income, `-|amount|` for expense.
    pub fn signed_amount(&self) -> Decimal {
        let magnitude = self.effective_amount().abs();
        match self.kind {
            TransactionKind::Income => magnitude,
            TransactionKind::Expense => -magnitude,
        }
    }

    /// Planned date when a completed override moved it.
    pub fn rescheduled_from(&self) -> Option<NaiveDate> {
        let effective = self.effective_date();
        (effective != self.transaction_date).then_some(self.transaction_date)
    }

    /// Planned amount when a completed override changed it.
    pub fn planned_amount_if_adjusted(&self) -> Option<Decimal> {
        let effective = self.effective_amount();
        (effective != self.amount).then_some(self.amount)
    }

    /// Applies a partial update, validating the resulting record before committing it.
    pub fn apply(&mut self, patch: TransactionPatch) -> Result<()> {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            next.amount = amount;
        }
        if let Some(date) = patch.transaction_date {
            next.transaction_date = date;
        }
        if let Some(done) = patch.is_completed {
            next.is_completed = done;
        }
        if let Some(date) = patch.completed_date {
            next.completed_date = date;
        }
        if let Some(amount) = patch.completed_amount {
            next.completed_amount = amount;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        ensure_title(&self.title)?;
        ensure_non_negative("amount", self.amount)?;
        if let Some(amount) = self.completed_amount {
            ensure_non_negative("completed amount", amount)?;
        }
        Ok(())
    }
}

/// Payload for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_amount: Option<Decimal>,
}

impl NewTransaction {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        transaction_date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            transaction_date,
            kind,
            is_completed: false,
            completed_date: None,
            completed_amount: None,
        }
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_title(&self.title)?;
        ensure_non_negative("amount", self.amount)?;
        if let Some(amount) = self.completed_amount {
            ensure_non_negative("completed amount", amount)?;
        }
        Ok(())
    }
}

/// Partial update. Override fields take `Some(None)` to clear a recorded value.
/// The kind is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub transaction_date: Option<NaiveDate>,
    pub is_completed: Option<bool>,
    pub completed_date: Option<Option<NaiveDate>>,
    pub completed_amount: Option<Option<Decimal>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn completion(completed_date: NaiveDate, completed_amount: Decimal) -> Self {
        Self {
            is_completed: Some(true),
            completed_date: Some(Some(completed_date)),
            completed_amount: Some(Some(completed_amount)),
            ..Self::default()
        }
    }
}

fn ensure_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CashflowError::InvalidInput("title must not be empty".into()));
    }
    Ok(())
}

fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CashflowError::InvalidInput(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    Ok(())
}
