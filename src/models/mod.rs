//! Core data models for the Benefit Engine.
//!
//! This module contains the childcare calculator's input and result types and
//! the audit/warning structures shared by all calculators.

mod calculation_result;
mod childcare;

pub use calculation_result::{
    AuditStep, CalculationResult, CalculationWarning, CompanyPayBasis, WarningSeverity,
};
pub use childcare::{
    CalculationInput, HOURS_PER_WEEK, IncomeItem, MAX_MONEY_AMOUNT, OffsetRule, PayMode,
    PolicyParameters, WageInput, example_income_items,
};
