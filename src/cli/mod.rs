//! `cashflow_cli`: terminal front end over the store, period calculator, and projector.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{errors::Result, ledger::TransactionKind};

#[derive(Debug, Parser)]
#[command(
    name = "cashflow_cli",
    version,
    about = "Track planned and realized cash flow across 15th-to-14th pay cycles"
)]
pub struct Cli {
    /// Transaction file (defaults to the configured or app-directory store).
    #[arg(long, env = "CASHFLOW_STORE", global = true)]
    pub store: Option<PathBuf>,
    /// Configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Pretend today is this date (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the billing window and its chart range.
    Period(WindowArgs),
    /// Print the running balance for each day of a window.
    Balances {
        #[command(flatten)]
        window: WindowArgs,
        /// Include the chart padding around the billing window.
        #[arg(long)]
        padded: bool,
    },
    /// Today's balance, totals, and planned/completed counts.
    Summary(WindowArgs),
    /// List planned then completed transactions.
    List,
    /// Record a new transaction.
    Add(AddArgs),
    /// Change fields of an existing transaction.
    Edit(EditArgs),
    /// Remove a transaction.
    Delete { id: Uuid },
    /// Mark a transaction as completed.
    Complete {
        id: Uuid,
        /// Realized date (defaults to the planned date).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Realized amount (defaults to the planned amount).
        #[arg(long)]
        amount: Option<Decimal>,
    },
    /// Complete every planned transaction dated before today.
    Sweep,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct WindowArgs {
    /// Periods relative to the current one (negative for earlier).
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i32,
    /// Span every transaction instead of a single period.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub amount: Decimal,
    /// Planned date (defaults to today).
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// `income` or `expense`.
    #[arg(long, default_value = "expense")]
    pub kind: TransactionKind,
    /// Record as already happened.
    #[arg(long)]
    pub completed: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: Uuid,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub amount: Option<Decimal>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub completed: Option<bool>,
}

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> Result<()> {
    commands::execute(Cli::parse())
}
