mod common;

use cashflow_core::{
    compute_period_window,
    currency::LocaleConfig,
    ledger::{period::CHART_PADDING_DAYS, PeriodCalculator, TransactionKind},
    CashflowError,
};
use chrono::{Datelike, Duration};
use common::{date, planned};
use rust_decimal_macros::dec;

#[test]
fn before_the_fifteenth_the_period_started_last_month() {
    let window = compute_period_window(date(2024, 3, 10), 0).unwrap();
    assert_eq!(window.start, date(2024, 2, 15));
    assert_eq!(window.end, date(2024, 3, 14));
}

#[test]
fn from_the_fifteenth_the_period_starts_this_month() {
    let window = compute_period_window(date(2024, 3, 20), 0).unwrap();
    assert_eq!(window.start, date(2024, 3, 15));
    assert_eq!(window.end, date(2024, 4, 14));

    let boundary = compute_period_window(date(2024, 3, 15), 0).unwrap();
    assert_eq!(boundary.start, date(2024, 3, 15));
    let eve = compute_period_window(date(2024, 3, 14), 0).unwrap();
    assert_eq!(eve.end, date(2024, 3, 14));
}

#[test]
fn consecutive_offsets_tile_the_calendar() {
    let now = date(2024, 11, 3);
    for offset in -30..30 {
        let current = compute_period_window(now, offset).unwrap();
        let next = compute_period_window(now, offset + 1).unwrap();
        assert_eq!(current.end + Duration::days(1), next.start, "offset {offset}");
        assert_eq!(current.start.day(), 15);
        assert_eq!(current.end.day(), 14);
    }
}

#[test]
fn offset_zero_always_contains_now() {
    let mut day = date(2023, 1, 1);
    while day <= date(2025, 1, 1) {
        let window = compute_period_window(day, 0).unwrap();
        assert!(window.contains(day), "{day} not in {}..{}", window.start, window.end);
        day += Duration::days(1);
    }
}

#[test]
fn chart_range_pads_two_days_each_side() {
    let window = compute_period_window(date(2024, 12, 20), 0).unwrap();
    assert_eq!(window.start, date(2024, 12, 15));
    assert_eq!(window.end, date(2025, 1, 14));
    assert_eq!(window.chart_start, window.start - Duration::days(CHART_PADDING_DAYS));
    assert_eq!(window.chart_end, date(2025, 1, 16));
    assert_eq!(window.chart_day_count(), window.day_count() + 4);
}

#[test]
fn offsets_cross_year_boundaries_both_ways() {
    let back = compute_period_window(date(2024, 1, 5), -1).unwrap();
    assert_eq!(back.start, date(2023, 11, 15));
    assert_eq!(back.end, date(2023, 12, 14));

    let forward = compute_period_window(date(2024, 12, 15), 13).unwrap();
    assert_eq!(forward.start, date(2026, 1, 15));
}

#[test]
fn absurd_offsets_are_rejected() {
    let result = compute_period_window(date(2024, 3, 10), i32::MAX);
    assert!(matches!(result, Err(CashflowError::InvalidInput(_))));
}

#[test]
fn labels_follow_the_locale() {
    let english = compute_period_window(date(2024, 3, 10), 0).unwrap();
    assert_eq!(english.label, "15 Feb 2024 – 14 Mar 2024");

    let turkish = PeriodCalculator::new(LocaleConfig::for_tag("tr-TR"))
        .window(date(2024, 3, 10), 0)
        .unwrap();
    assert_eq!(turkish.label, "15 Şub 2024 – 14 Mar 2024");
}

#[test]
fn all_time_spans_every_effective_date() {
    let transactions = vec![
        planned(TransactionKind::Income, dec!(1), date(2024, 2, 1)),
        planned(TransactionKind::Expense, dec!(1), date(2023, 12, 24)),
        planned(TransactionKind::Expense, dec!(1), date(2024, 6, 30)),
    ];
    let calculator = PeriodCalculator::default();

    let window = calculator.all_time(&transactions).unwrap().unwrap();
    assert_eq!(window.start, date(2023, 12, 24));
    assert_eq!(window.end, date(2024, 6, 30));
    assert_eq!(window.chart_start, date(2023, 12, 19));
    assert_eq!(window.chart_end, date(2024, 7, 10));
    assert_eq!(window.label, "All time");

    assert!(calculator.all_time(&[]).unwrap().is_none());
}
