//! Parsing and formatting of form values.
//!
//! Form fields carry locale-formatted text such as `"3,000,000"`. This module
//! turns that text into [`Decimal`] values and formats results back into the
//! single supported display format: whole won with thousands separators and a
//! `원` suffix.
//!
//! Rounding to whole won happens here and nowhere else; calculators keep full
//! precision.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// The currency suffix appended by [`format_won`].
pub const CURRENCY_SUFFIX: &str = "원";

/// Parses a locale-formatted number, ignoring thousands separators and spaces.
///
/// Returns `None` for empty or unparseable text. Callers that need a number
/// regardless substitute zero, which then fails any "must be positive" check.
///
/// # Examples
///
/// ```
/// use benefit_engine::format::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("3,000,000"), Some(Decimal::from(3_000_000)));
/// assert_eq!(parse_amount(" 1 500 "), Some(Decimal::from(1_500)));
/// assert_eq!(parse_amount(""), None);
/// assert_eq!(parse_amount("abc"), None);
/// ```
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parses an ISO `YYYY-MM-DD` date, returning `None` when it is not a valid date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Rounds an amount to the nearest whole won, halves away from zero.
pub fn round_won(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a number rounded to a whole unit with thousands separators.
///
/// # Examples
///
/// ```
/// use benefit_engine::format::format_number;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_number(Decimal::new(12_345_675, 1)), "1,234,568");
/// assert_eq!(format_number(Decimal::from(-2_500)), "-2,500");
/// ```
pub fn format_number(amount: Decimal) -> String {
    let rounded = round_won(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats an amount as whole won, e.g. `"625,000원"`.
///
/// # Examples
///
/// ```
/// use benefit_engine::format::format_won;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_won(Decimal::from(625_000)), "625,000원");
/// assert_eq!(format_won(Decimal::new(4995, 1)), "500원");
/// ```
pub fn format_won(amount: Decimal) -> String {
    format!("{}{}", format_number(amount), CURRENCY_SUFFIX)
}

/// Formats a ratio with exactly four decimal places, as written into the ratio field.
pub fn format_ratio(ratio: Decimal) -> String {
    format!(
        "{:.4}",
        ratio.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Formats a ratio as a whole percentage, e.g. `0.75` as `"75%"`.
pub fn format_percent(ratio: Decimal) -> String {
    format!("{}%", round_won(ratio * Decimal::ONE_HUNDRED))
}
