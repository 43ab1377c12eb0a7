//! Calculation result models for the Benefit Engine.
//!
//! This module contains the [`CalculationResult`] type produced by the
//! childcare benefit calculator, together with the audit and warning
//! structures shared by every calculator in the crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which rule produced the company-paid figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyPayBasis {
    /// The entered total monthly pay, reduced in proportion to the hours.
    TotalOverride,
    /// The ordinary wage, assumed to be reduced in proportion to the hours.
    OrdinaryWageProportional,
    /// Each income item according to its own pay mode.
    ItemizedPayModes,
}

/// How serious a warning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; nothing for the user to do.
    Info,
    /// The user should check or enter something by hand.
    Warning,
}

/// An advisory message that does not block a calculation.
///
/// # Example
///
/// ```
/// use benefit_engine::models::{CalculationWarning, WarningSeverity};
///
/// let warning = CalculationWarning::new(
///     "FLOOR_APPLIED",
///     "computed benefit is below the monthly floor",
///     WarningSeverity::Info,
/// );
/// assert_eq!(warning.code, "FLOOR_APPLIED");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
}

impl CalculationWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of a childcare benefit calculation.
///
/// All monetary figures are unrounded; round with
/// [`round_won`](crate::format::round_won) or format with
/// [`format_won`](crate::format::format_won) for display.
///
/// `benefit_tier_a` and `benefit_tier_b` are the per-tier amounts scaled by
/// the proration ratio, before the floor and the offset rule; they need not
/// add up to `total_benefit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The ordinary wage the benefit is based on.
    pub ordinary_wage_base: Decimal,
    /// Weekly hours removed by the reduction.
    pub reduced_hours: Decimal,
    /// Hours after divided by hours before.
    pub hours_ratio: Decimal,
    /// Tier A amount after proration.
    pub benefit_tier_a: Decimal,
    /// Tier B amount after proration.
    pub benefit_tier_b: Decimal,
    /// The benefit payable for the period.
    pub total_benefit: Decimal,
    /// Whether the monthly floor replaced a lower computed amount.
    pub floor_applied: bool,
    /// The amount removed from the benefit by the offset rule.
    pub offset_reduction: Decimal,
    /// Prorated company pay before the reduction.
    pub company_paid_before: Decimal,
    /// Prorated company pay after the reduction.
    pub company_paid_after: Decimal,
    /// Which rule produced the company-paid figures.
    pub company_pay_basis: CompanyPayBasis,
    /// Company pay after the reduction plus the benefit.
    pub grand_total_income: Decimal,
    /// Advisory messages raised during the calculation.
    pub warnings: Vec<CalculationWarning>,
    /// Every rule applied, in order.
    pub audit_trace: Vec<AuditStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_pay_basis_serialization() {
        let json = serde_json::to_string(&CompanyPayBasis::TotalOverride).unwrap();
        assert_eq!(json, "\"total_override\"");

        let basis: CompanyPayBasis = serde_json::from_str("\"itemized_pay_modes\"").unwrap();
        assert_eq!(basis, CompanyPayBasis::ItemizedPayModes);
    }

    #[test]
    fn test_warning_serialization() {
        let warning = CalculationWarning::new("SPANS_MONTHS", "enter ratio", WarningSeverity::Warning);
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["code"], "SPANS_MONTHS");
        assert_eq!(json["severity"], "warning");
    }

    #[test]
    fn test_audit_step_round_trips_through_json() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "tier_a_benefit".to_string(),
            rule_name: "Tier A Benefit".to_string(),
            input: serde_json::json!({"hours": "10"}),
            output: serde_json::json!({"amount": "625000"}),
            reasoning: "10 of 40 hours".to_string(),
        };
        let json = serde_json::to_string(&step).unwrap();
        let parsed: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, step);
    }

    #[test]
    fn test_decimal_fields_serialize_as_strings() {
        let result = CalculationResult {
            ordinary_wage_base: Decimal::from(3_000_000),
            reduced_hours: Decimal::from(10),
            hours_ratio: Decimal::new(75, 2),
            benefit_tier_a: Decimal::from(625_000),
            benefit_tier_b: Decimal::ZERO,
            total_benefit: Decimal::from(625_000),
            floor_applied: false,
            offset_reduction: Decimal::ZERO,
            company_paid_before: Decimal::from(3_000_000),
            company_paid_after: Decimal::from(2_250_000),
            company_pay_basis: CompanyPayBasis::OrdinaryWageProportional,
            grand_total_income: Decimal::from(2_875_000),
            warnings: vec![],
            audit_trace: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_benefit"], "625000");
        assert_eq!(json["hours_ratio"], "0.75");
        assert_eq!(json["company_pay_basis"], "ordinary_wage_proportional");
    }
}
