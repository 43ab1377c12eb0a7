//! Policy resolution by effective date.
//!
//! The auto-policy option of the childcare form fills the threshold, caps and
//! floor from the start date of the reduction period. This module exposes that
//! lookup over raw date text: an unparseable date yields `None`, and the caller
//! keeps whatever parameters it already had.

use crate::config::PolicyTable;
use crate::models::PolicyParameters;

/// Resolves the built-in policy parameters for a `YYYY-MM-DD` date.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::resolve_policy;
/// use rust_decimal::Decimal;
///
/// let policy = resolve_policy("2024-06-30").unwrap();
/// assert_eq!(policy.hours_threshold_tier_a, Decimal::from(5));
///
/// let policy = resolve_policy("2024-07-01").unwrap();
/// assert_eq!(policy.hours_threshold_tier_a, Decimal::from(10));
///
/// assert!(resolve_policy("not a date").is_none());
/// ```
pub fn resolve_policy(date: &str) -> Option<PolicyParameters> {
    resolve_policy_with(&PolicyTable::builtin(), date)
}

/// Resolves policy parameters for a `YYYY-MM-DD` date from the given table.
pub fn resolve_policy_with(table: &PolicyTable, date: &str) -> Option<PolicyParameters> {
    table.resolve_policy(date)
}
