//! Pay-cycle windows running from the 15th of one month to the 14th of the next.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Transaction;
use crate::{
    currency::{format_medium_date, LocaleConfig},
    errors::{CashflowError, Result},
};

pub const CYCLE_START_DAY: u32 = 15;
pub const CYCLE_END_DAY: u32 = 14;
pub const CHART_PADDING_DAYS: i64 = 2;

const ALL_TIME_LEAD_DAYS: i64 = 5;
const ALL_TIME_TRAIL_DAYS: i64 = 10;

/// A billing window plus the padded range used when charting it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub chart_start: NaiveDate,
    pub chart_end: NaiveDate,
    pub label: String,
}

impl PeriodWindow {
    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn chart_day_count(&self) -> i64 {
        (self.chart_end - self.chart_start).num_days() + 1
    }
}

/// Derives period windows relative to an explicit reference date.
#[derive(Debug, Clone, Default)]
pub struct PeriodCalculator {
    locale: LocaleConfig,
}

impl PeriodCalculator {
    pub fn new(locale: LocaleConfig) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    /// Window `offset` periods away from the one containing `now`.
    ///
    /// Before the 15th the current period began on the 15th of the previous
    /// month; from the 15th on it began this month. Fails with
    /// [`CashflowError::InvalidInput`] when the offset leaves the calendar range.
    pub fn window(&self, now: NaiveDate, offset: i32) -> Result<PeriodWindow> {
        let base: i64 = if now.day() < CYCLE_START_DAY { -1 } else { 0 };
        let months = base + i64::from(offset);
        let start = day_of_shifted_month(now, months, CYCLE_START_DAY)?;
        let end = day_of_shifted_month(now, months + 1, CYCLE_END_DAY)?;
        let chart_start = shift_days(start, -CHART_PADDING_DAYS)?;
        let chart_end = shift_days(end, CHART_PADDING_DAYS)?;
        let label = format!(
            "{} – {}",
            format_medium_date(&self.locale, start),
            format_medium_date(&self.locale, end)
        );
        debug!(%now, offset, %start, %end, "computed period window");
        Ok(PeriodWindow {
            start,
            end,
            chart_start,
            chart_end,
            label,
        })
    }

    /// Window spanning every effective date in `transactions`, padded five days
    /// before and ten days after. `None` when there is nothing to span.
    pub fn all_time(&self, transactions: &[Transaction]) -> Result<Option<PeriodWindow>> {
        let mut dates = transactions.iter().map(Transaction::effective_date);
        let Some(first) = dates.next() else {
            return Ok(None);
        };
        let (start, end) = dates.fold((first, first), |(lo, hi), date| (lo.min(date), hi.max(date)));
        Ok(Some(PeriodWindow {
            start,
            end,
            chart_start: shift_days(start, -ALL_TIME_LEAD_DAYS)?,
            chart_end: shift_days(end, ALL_TIME_TRAIL_DAYS)?,
            label: self.locale.language.all_time_label().to_string(),
        }))
    }
}

/// Period window for `now` shifted by `offset`, labelled with the default locale.
pub fn compute_period_window(now: NaiveDate, offset: i32) -> Result<PeriodWindow> {
    PeriodCalculator::default().window(now, offset)
}

fn day_of_shifted_month(date: NaiveDate, months: i64, day: u32) -> Result<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(index.div_euclid(12)).map_err(|_| out_of_range(date, months))?;
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| out_of_range(date, months))
}

fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days)).ok_or_else(|| {
        CashflowError::InvalidInput(format!("{date} shifted by {days} days is out of range"))
    })
}

fn out_of_range(date: NaiveDate, months: i64) -> CashflowError {
    CashflowError::InvalidInput(format!(
        "{date} shifted by {months} months is outside the supported calendar"
    ))
}
