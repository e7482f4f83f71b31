use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::{output, AddArgs, Cli, Command, EditArgs, WindowArgs};
use crate::{
    clock::{Clock, SystemClock},
    config::{Config, ConfigManager},
    currency::{format_currency_value, format_medium_date, CurrencyCode, FormatOptions, LocaleConfig},
    errors::{CashflowError, Result},
    ledger::{split_by_status, summarize, NewTransaction, PeriodWindow, Transaction, TransactionKind, TransactionPatch},
    storage::{JsonTransactionStore, TransactionStore},
    sweep::auto_complete_past_due,
};

/// Everything a command needs, resolved once from flags and configuration.
struct CommandContext {
    config: Config,
    store: JsonTransactionStore,
    today: NaiveDate,
    locale: LocaleConfig,
    currency: CurrencyCode,
    format: FormatOptions,
}

impl CommandContext {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::with_config_file(path.clone()),
            None => ConfigManager::new()?,
        };
        let config = manager.load()?;
        let store_path = cli
            .store
            .clone()
            .unwrap_or_else(|| manager.store_path(&config));
        let store = JsonTransactionStore::open(store_path)?;
        let today = match cli.today {
            Some(date) => date,
            None => SystemClock::new(config.utc_offset()?).today(),
        };
        debug!(store = %store.path().display(), %today, "cli context ready");
        Ok(Self {
            locale: config.locale_config(),
            currency: config.currency_code(),
            format: config.format_options(),
            config,
            store,
            today,
        })
    }

    fn money(&self, amount: Decimal) -> String {
        format_currency_value(amount, &self.currency, &self.locale, &self.format)
    }

    fn date(&self, date: NaiveDate) -> String {
        format_medium_date(&self.locale, date)
    }

    fn resolve_window(&self, args: WindowArgs, transactions: &[Transaction]) -> Result<Option<PeriodWindow>> {
        let calculator = self.config.period_calculator();
        if args.all {
            calculator.all_time(transactions)
        } else {
            calculator.window(self.today, args.offset).map(Some)
        }
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let mut ctx = CommandContext::from_cli(&cli)?;
    match cli.command {
        Command::Period(args) => show_period(&ctx, args),
        Command::Balances { window, padded } => show_balances(&ctx, window, padded),
        Command::Summary(args) => show_summary(&ctx, args),
        Command::List => list_transactions(&ctx),
        Command::Add(args) => add_transaction(&mut ctx, args),
        Command::Edit(args) => edit_transaction(&mut ctx, args),
        Command::Delete { id } => {
            ctx.store.delete(id)?;
            output::success(format!("Deleted {id}"));
            Ok(())
        }
        Command::Complete { id, date, amount } => {
            let txn = ctx.store.get(id)?;
            let completed_date = date.unwrap_or(txn.transaction_date);
            let completed_amount = amount.unwrap_or(txn.amount);
            let done = ctx.store.mark_completed(id, completed_date, completed_amount)?;
            output::success(format!(
                "Completed {} on {} for {}",
                done.title,
                ctx.date(completed_date),
                ctx.money(completed_amount)
            ));
            Ok(())
        }
        Command::Sweep => run_sweep(&mut ctx),
    }
}

fn show_period(ctx: &CommandContext, args: WindowArgs) -> Result<()> {
    let transactions = ctx.store.list()?;
    let Some(window) = ctx.resolve_window(args, &transactions)? else {
        output::info("No transactions recorded yet.");
        return Ok(());
    };
    output::section(&window.label);
    output::info(format!("Period: {} .. {}", window.start, window.end));
    output::info(format!("Chart:  {} .. {}", window.chart_start, window.chart_end));
    output::info(format!("Days:   {}", window.day_count()));
    Ok(())
}

/// The all-time view always spans its padded range.
fn projection_range(window: &PeriodWindow, args: WindowArgs, padded: bool) -> (NaiveDate, NaiveDate) {
    if padded || args.all {
        (window.chart_start, window.chart_end)
    } else {
        (window.start, window.end)
    }
}

fn show_balances(ctx: &CommandContext, args: WindowArgs, padded: bool) -> Result<()> {
    let transactions = ctx.store.list()?;
    let Some(window) = ctx.resolve_window(args, &transactions)? else {
        output::info("No transactions recorded yet.");
        return Ok(());
    };
    let (from, to) = projection_range(&window, args, padded);
    let series = ctx.config.projector().project(&transactions, from, to)?;
    output::section(&window.label);
    if series.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }
    for day in &series {
        let marker = if day.date == ctx.today { "*" } else { " " };
        let amount = output::signed(
            format!("{:>16}", ctx.money(day.balance)),
            day.balance.is_sign_negative() && !day.balance.is_zero(),
        );
        output::info(format!("{marker} {}  {:<8} {}", day.date, day.label, amount));
    }
    Ok(())
}

fn show_summary(ctx: &CommandContext, args: WindowArgs) -> Result<()> {
    let transactions = ctx.store.list()?;
    let series = match ctx.resolve_window(args, &transactions)? {
        Some(window) => {
            output::section(&window.label);
            let (from, to) = projection_range(&window, args, false);
            ctx.config.projector().project(&transactions, from, to)?
        }
        None => Vec::new(),
    };
    let summary = summarize(&transactions, &series, ctx.today);
    output::info(format!("Today's balance: {}", ctx.money(summary.today_balance)));
    output::info(format!("Closing balance: {}", ctx.money(summary.closing_balance)));
    output::info(format!("Total income:    {}", ctx.money(summary.total_income)));
    output::info(format!("Total expense:   {}", ctx.money(summary.total_expense)));
    output::info(format!(
        "Planned: {}  Completed: {}",
        summary.planned, summary.completed
    ));
    Ok(())
}

fn list_transactions(ctx: &CommandContext) -> Result<()> {
    let transactions = ctx.store.list()?;
    if transactions.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }
    let (planned, completed) = split_by_status(&transactions);
    for (title, group) in [("Planned", planned), ("Completed", completed)] {
        if group.is_empty() {
            continue;
        }
        output::section(format!("{title} ({})", group.len()));
        for txn in group {
            output::info(describe(ctx, txn));
        }
    }
    Ok(())
}

fn describe(ctx: &CommandContext, txn: &Transaction) -> String {
    let effective = txn.effective();
    let sign = match txn.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };
    let amount = output::signed(
        format!("{sign}{}", ctx.money(effective.amount.abs())),
        txn.kind == TransactionKind::Expense,
    );
    let mut line = format!("{}  {}  {}  {}", txn.id, ctx.date(effective.date), amount, txn.title);
    if let Some(planned) = txn.rescheduled_from() {
        line.push_str(&format!("  (planned: {})", ctx.date(planned)));
    }
    if let Some(planned) = txn.planned_amount_if_adjusted() {
        line.push_str(&format!("  (plan: {})", ctx.money(planned)));
    }
    line
}

fn add_transaction(ctx: &mut CommandContext, args: AddArgs) -> Result<()> {
    let mut draft = NewTransaction::new(
        args.title,
        args.amount,
        args.date.unwrap_or(ctx.today),
        args.kind,
    );
    draft.is_completed = args.completed;
    let created = ctx.store.create(draft)?;
    output::success(format!("Added {} ({})", created.title, created.id));
    Ok(())
}

fn edit_transaction(ctx: &mut CommandContext, args: EditArgs) -> Result<()> {
    let patch = TransactionPatch {
        title: args.title,
        amount: args.amount,
        transaction_date: args.date,
        is_completed: args.completed,
        ..TransactionPatch::default()
    };
    if patch.is_empty() {
        return Err(CashflowError::InvalidInput("nothing to change".into()));
    }
    let updated = ctx.store.update(args.id, patch)?;
    output::success(format!("Updated {} ({})", updated.title, updated.id));
    Ok(())
}

fn run_sweep(ctx: &mut CommandContext) -> Result<()> {
    let today = ctx.today;
    let report = auto_complete_past_due(&mut ctx.store, today)?;
    for failure in &report.failures {
        output::warning(format!("Could not complete {}: {}", failure.id, failure.reason));
    }
    output::success(format!(
        "Auto-completed {} past-due transaction(s)",
        report.completed.len()
    ));
    Ok(())
}
