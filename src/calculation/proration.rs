//! Proration ratio derived from the reduction period dates.
//!
//! Monthly figures are scaled by the share of the calendar month the reduction
//! covers. A single ratio can only be derived when both dates fall in the same
//! month; a period spanning several months needs month-by-month proration,
//! which the user has to enter by hand, so the resolver only warns in that
//! case.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{CalculationWarning, WarningSeverity};

/// Warning code raised when the period spans more than one calendar month.
pub const SPANS_MONTHS_WARNING: &str = "SPANS_MONTHS";

/// Decimal places the derived ratio is rounded to.
pub const RATIO_DECIMAL_PLACES: u32 = 4;

/// The outcome of deriving a proration ratio from two dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProrationRatio {
    /// Both dates fall in the same month.
    SingleMonth {
        /// Days covered, counting both ends.
        covered_days: u32,
        /// Days in the calendar month.
        days_in_month: u32,
        /// `covered_days / days_in_month`, rounded to four decimal places.
        ratio: Decimal,
    },
    /// The dates fall in different months; no single ratio applies.
    SpansMonths {
        /// The warning to show the user.
        warning: CalculationWarning,
    },
}

impl ProrationRatio {
    /// Returns the derived ratio, if one could be derived.
    pub fn ratio(&self) -> Option<Decimal> {
        match self {
            ProrationRatio::SingleMonth { ratio, .. } => Some(*ratio),
            ProrationRatio::SpansMonths { .. } => None,
        }
    }

    /// Returns the derived ratio, or `current` unchanged when none could be derived.
    pub fn apply_to(&self, current: Decimal) -> Decimal {
        self.ratio().unwrap_or(current)
    }

    /// Returns the warning raised while resolving, if any.
    pub fn warning(&self) -> Option<&CalculationWarning> {
        match self {
            ProrationRatio::SingleMonth { .. } => None,
            ProrationRatio::SpansMonths { warning } => Some(warning),
        }
    }
}

/// Returns the number of days in the given month of the proleptic Gregorian calendar.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2026, 1), 31);
/// assert_eq!(days_in_month(2024, 2), 29);
/// assert_eq!(days_in_month(2025, 2), 28);
/// assert_eq!(days_in_month(2025, 4), 30);
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Derives the proration ratio for an inclusive date range.
///
/// # Returns
///
/// - `Err(EndBeforeStart)` when `end` is before `start`; the calculation must
///   not go ahead.
/// - [`ProrationRatio::SingleMonth`] when both dates are in the same month,
///   with the ratio clamped to [0, 1] and rounded to four decimal places.
/// - [`ProrationRatio::SpansMonths`] with a warning otherwise.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::resolve_proration_ratio;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// let resolved = resolve_proration_ratio(start, end).unwrap();
/// assert_eq!(resolved.ratio(), Some(Decimal::ONE));
/// ```
pub fn resolve_proration_ratio(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ProrationRatio, ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }

    if start.year() != end.year() || start.month() != end.month() {
        return Ok(ProrationRatio::SpansMonths {
            warning: CalculationWarning::new(
                SPANS_MONTHS_WARNING,
                format!(
                    "start date {} and end date {} are in different months; \
                     proration must be done month by month, so enter the ratio manually",
                    start, end
                ),
                WarningSeverity::Warning,
            ),
        });
    }

    // Same month, so the difference is at most 30 days.
    let covered_days = (end - start).num_days() as u32 + 1;
    let days_in_month = days_in_month(start.year(), start.month());

    let ratio = (Decimal::from(covered_days) / Decimal::from(days_in_month))
        .clamp(Decimal::ZERO, Decimal::ONE)
        .round_dp_with_strategy(RATIO_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    Ok(ProrationRatio::SingleMonth {
        covered_days,
        days_in_month,
        ratio,
    })
}
