//! Locale-aware rendering of money amounts and calendar dates.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Languages with bundled month names and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Turkish,
}

impl Language {
    pub fn month_abbreviation(self, month: u32) -> &'static str {
        let names = match self {
            Language::English => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            Language::Turkish => [
                "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
            ],
        };
        month
            .checked_sub(1)
            .and_then(|idx| names.get(idx as usize))
            .copied()
            .unwrap_or("")
    }

    pub fn all_time_label(self) -> &'static str {
        match self {
            Language::English => "All time",
            Language::Turkish => "Tüm Süreç",
        }
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub language: Language,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl LocaleConfig {
    /// Resolves a BCP 47 tag such as `en-US` or `tr-TR`. Unknown tags fall back
    /// to English conventions while keeping the requested tag.
    pub fn for_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "tr" => Self {
                language_tag: tag.to_string(),
                language: Language::Turkish,
                decimal_separator: ',',
                grouping_separator: '.',
            },
            _ => Self {
                language_tag: tag.to_string(),
                language: Language::English,
                decimal_separator: '.',
                grouping_separator: ',',
            },
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("en-US")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
    /// Overrides the currency's minor units when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction_digits: Option<u32>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
            fraction_digits: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
    SymbolAndCode,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "TRY" => "₺".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u32 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders `value` with exactly `precision` fraction digits, rounding half away
/// from zero, using the locale's separators.
pub fn format_number(locale: &LocaleConfig, value: Decimal, precision: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(precision);
    let raw = rounded.to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    let mut body = format!("{}{}", sign, group_digits(int_part, locale.grouping_separator));
    if let Some(frac) = frac_part {
        body.push(locale.decimal_separator);
        body.push_str(frac);
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: Decimal,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = options
        .fraction_digits
        .unwrap_or_else(|| minor_units_for(code.as_str()));
    let body = format_number(locale, amount.abs(), precision);
    // Rounding can turn a tiny negative into zero; never print "-0".
    let negative = amount.is_sign_negative() && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    let symbol = symbol_for(code.as_str());
    let unsigned = match options.currency_display {
        CurrencyDisplay::Symbol => format!("{}{}", symbol, body),
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), body),
        CurrencyDisplay::SymbolAndCode => format!("{}{} ({})", symbol, body, code.as_str()),
    };
    if !negative {
        return unsigned;
    }
    match options.negative_style {
        NegativeStyle::Sign => format!("-{}", unsigned),
        NegativeStyle::Parentheses => format!("({})", unsigned),
    }
}

/// `d MMM yyyy`, e.g. `15 Feb 2024`.
pub fn format_medium_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        locale.language.month_abbreviation(date.month()),
        date.year()
    )
}

/// `d MMM`, e.g. `15 Feb`.
pub fn format_short_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    format!(
        "{} {}",
        date.day(),
        locale.language.month_abbreviation(date.month())
    )
}
