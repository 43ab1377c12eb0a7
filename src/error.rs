//! Error types for the Benefit Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! [`EngineError`] covers configuration problems and rejected inputs, while
//! [`ValidationError`] enumerates every individual input check a calculator
//! can fail. Validation errors are collected rather than returned one at a
//! time, so a caller can show all of them at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Benefit Engine.
///
/// # Example
///
/// ```
/// use benefit_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/childcare_policies.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/childcare_policies.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a structural rule (e.g. an empty policy table).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// The calculation input failed one or more validation checks.
    ///
    /// No numeric result is produced when this error is returned.
    #[error("Invalid input: {}", join_messages(.errors))]
    InvalidInput {
        /// Every check that failed, in the order the checks were run.
        errors: Vec<ValidationError>,
    },
}

/// A single failed input check.
///
/// Messages are written for display next to the form that produced the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Weekly hours before the reduction must be positive.
    #[error("hours before reduction must be greater than 0")]
    NonPositiveHoursBefore,

    /// Weekly hours after the reduction must be positive.
    #[error("hours after reduction must be greater than 0")]
    NonPositiveHoursAfter,

    /// Hours after the reduction cannot exceed hours before it.
    #[error("hours after reduction ({after}) must not exceed hours before reduction ({before})")]
    HoursAfterExceedBefore {
        /// Hours before the reduction.
        before: Decimal,
        /// Hours after the reduction.
        after: Decimal,
    },

    /// The reduction period ends before it starts.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// The period start date.
        start: NaiveDate,
        /// The period end date.
        end: NaiveDate,
    },

    /// The proration ratio must lie within [0, 1].
    #[error("proration ratio {ratio} must be between 0 and 1")]
    RatioOutOfRange {
        /// The rejected ratio.
        ratio: Decimal,
    },

    /// Direct mode needs a positive ordinary wage.
    #[error("ordinary wage must be entered")]
    MissingOrdinaryWage,

    /// Detailed mode needs at least one income item.
    #[error("at least one income item must be added")]
    NoIncomeItems,

    /// Detailed mode needs at least one ordinary-wage item with a positive amount.
    #[error("ordinary wage from items counted as ordinary wage is 0")]
    ZeroOrdinaryWage,

    /// An income item carries a negative amount.
    #[error("income item '{label}' has a negative amount")]
    NegativeIncomeItem {
        /// The label of the offending item.
        label: String,
    },

    /// A number lies outside the range its field accepts.
    #[error("{field} ({value}) must be between 0 and {max}")]
    ValueOutOfRange {
        /// The field holding the value.
        field: String,
        /// The rejected value.
        value: Decimal,
        /// The largest accepted value.
        max: Decimal,
    },

    /// The average monthly wage for the unemployment calculation must be positive.
    #[error("average monthly wage must be entered")]
    MissingAverageWage,

    /// The monthly deposit for the youth savings calculation must be positive.
    #[error("monthly deposit must be entered")]
    MissingMonthlyDeposit,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ValidationError> for EngineError {
    fn from(error: ValidationError) -> Self {
        EngineError::InvalidInput {
            errors: vec![error],
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
