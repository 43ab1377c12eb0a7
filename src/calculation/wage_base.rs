//! Ordinary wage base and company-paid amounts.
//!
//! The benefit is computed from the ordinary wage, while the total-income view
//! needs what the employer keeps paying after the reduction. Both come from the
//! wage input, which is either a single ordinary wage figure (direct mode) or
//! an itemized pay slip (detailed mode).
//!
//! ## Company pay after the reduction
//!
//! **Direct mode:** the whole monthly pay (the entered total, or the ordinary
//! wage when no total is given) shrinks in proportion to the hours.
//!
//! **Detailed mode:** each item follows its own [`PayMode`]:
//! - `Proportional`: amount × hours after / hours before
//! - `FullPay`: amount
//! - `NoPay`: nothing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{AuditStep, CompanyPayBasis, IncomeItem, MAX_MONEY_AMOUNT, PayMode, WageInput};

/// The wage figures a benefit calculation works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageBaseResult {
    /// The monthly ordinary wage (not prorated).
    pub ordinary_wage: Decimal,
    /// Prorated company pay before the reduction.
    pub company_paid_before: Decimal,
    /// Prorated company pay after the reduction.
    pub company_paid_after: Decimal,
    /// Which rule produced the company-paid figures.
    pub basis: CompanyPayBasis,
    /// The audit step recording the computation.
    pub audit_step: AuditStep,
}

/// Checks the wage input, returning every problem found.
///
/// Direct mode needs a positive ordinary wage. Detailed mode needs at least
/// one item, no negative amounts, and a positive sum over the items counted as
/// ordinary wage. An empty item list fails both of the latter checks. No
/// amount may exceed [`MAX_MONEY_AMOUNT`].
pub fn validate_wage_input(wage: &WageInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match wage {
        WageInput::Direct {
            ordinary_wage,
            company_paid_override,
        } => {
            if *ordinary_wage <= Decimal::ZERO {
                errors.push(ValidationError::MissingOrdinaryWage);
            }
            check_money(&mut errors, "ordinary wage", *ordinary_wage);
            if let Some(total) = company_paid_override {
                check_money(&mut errors, "total monthly pay", *total);
            }
        }
        WageInput::Detailed { items } => {
            if items.is_empty() {
                errors.push(ValidationError::NoIncomeItems);
            }
            for item in items {
                if item.monthly_amount < Decimal::ZERO {
                    errors.push(ValidationError::NegativeIncomeItem {
                        label: item.label.clone(),
                    });
                }
                check_money(
                    &mut errors,
                    &format!("income item '{}'", item.label),
                    item.monthly_amount,
                );
            }

            // Summing is only safe once every amount is bounded.
            let bounded = items
                .iter()
                .all(|item| item.monthly_amount.abs() <= MAX_MONEY_AMOUNT);
            if bounded && ordinary_wage_of(items) <= Decimal::ZERO {
                errors.push(ValidationError::ZeroOrdinaryWage);
            }
        }
    }

    errors
}

/// Records an error when a non-negative money amount exceeds [`MAX_MONEY_AMOUNT`].
pub(crate) fn check_money(errors: &mut Vec<ValidationError>, field: &str, amount: Decimal) {
    if amount > MAX_MONEY_AMOUNT {
        errors.push(ValidationError::ValueOutOfRange {
            field: field.to_string(),
            value: amount,
            max: MAX_MONEY_AMOUNT,
        });
    }
}

fn ordinary_wage_of(items: &[IncomeItem]) -> Decimal {
    items
        .iter()
        .filter(|item| item.counts_as_ordinary_wage)
        .map(|item| item.monthly_amount)
        .sum()
}

/// Computes the ordinary wage base and the prorated company-paid amounts.
///
/// The input must already have passed [`validate_wage_input`] and
/// `hours_before` must be positive.
///
/// # Arguments
///
/// * `wage` - The wage input in either mode
/// * `hours_before` - Weekly hours before the reduction (positive)
/// * `hours_after` - Weekly hours after the reduction
/// * `proration_ratio` - Share of the month covered
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::calculate_wage_base;
/// use benefit_engine::models::{CompanyPayBasis, WageInput};
/// use rust_decimal::Decimal;
///
/// let wage = WageInput::Direct {
///     ordinary_wage: Decimal::from(3_000_000),
///     company_paid_override: None,
/// };
/// let result = calculate_wage_base(&wage, Decimal::from(40), Decimal::from(30), Decimal::ONE, 1);
///
/// assert_eq!(result.company_paid_before, Decimal::from(3_000_000));
/// assert_eq!(result.company_paid_after, Decimal::from(2_250_000));
/// assert_eq!(result.basis, CompanyPayBasis::OrdinaryWageProportional);
/// ```
pub fn calculate_wage_base(
    wage: &WageInput,
    hours_before: Decimal,
    hours_after: Decimal,
    proration_ratio: Decimal,
    step_number: u32,
) -> WageBaseResult {
    let hours_factor = hours_after / hours_before;

    match wage {
        WageInput::Direct {
            ordinary_wage,
            company_paid_override,
        } => {
            let ordinary_wage = *ordinary_wage;
            let (company_base, basis) = match company_paid_override {
                Some(total) if *total > Decimal::ZERO => (*total, CompanyPayBasis::TotalOverride),
                _ => (ordinary_wage, CompanyPayBasis::OrdinaryWageProportional),
            };

            let company_paid_before = company_base * proration_ratio;
            let company_paid_after = company_base * hours_factor * proration_ratio;

            let reasoning = match basis {
                CompanyPayBasis::TotalOverride => format!(
                    "Entered total pay {} reduced in proportion to hours ({}/{}), prorated by {}",
                    company_base.normalize(),
                    hours_after.normalize(),
                    hours_before.normalize(),
                    proration_ratio.normalize()
                ),
                _ => format!(
                    "Ordinary wage {} assumed reduced in proportion to hours ({}/{}), prorated by {}",
                    company_base.normalize(),
                    hours_after.normalize(),
                    hours_before.normalize(),
                    proration_ratio.normalize()
                ),
            };

            WageBaseResult {
                ordinary_wage,
                company_paid_before,
                company_paid_after,
                basis,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "wage_base".to_string(),
                    rule_name: "Wage Base (Direct)".to_string(),
                    input: serde_json::json!({
                        "ordinary_wage": ordinary_wage.normalize().to_string(),
                        "company_paid_override": company_paid_override.map(|v| v.normalize().to_string()),
                        "hours_before": hours_before.normalize().to_string(),
                        "hours_after": hours_after.normalize().to_string(),
                        "proration_ratio": proration_ratio.normalize().to_string()
                    }),
                    output: serde_json::json!({
                        "ordinary_wage": ordinary_wage.normalize().to_string(),
                        "company_paid_before": company_paid_before.normalize().to_string(),
                        "company_paid_after": company_paid_after.normalize().to_string()
                    }),
                    reasoning,
                },
            }
        }
        WageInput::Detailed { items } => {
            let ordinary_wage = ordinary_wage_of(items);
            let total: Decimal = items.iter().map(|item| item.monthly_amount).sum();
            let after: Decimal = items
                .iter()
                .map(|item| match item.pay_mode {
                    PayMode::Proportional => item.monthly_amount * hours_factor,
                    PayMode::FullPay => item.monthly_amount,
                    PayMode::NoPay => Decimal::ZERO,
                })
                .sum();

            let company_paid_before = total * proration_ratio;
            let company_paid_after = after * proration_ratio;

            WageBaseResult {
                ordinary_wage,
                company_paid_before,
                company_paid_after,
                basis: CompanyPayBasis::ItemizedPayModes,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "wage_base".to_string(),
                    rule_name: "Wage Base (Itemized)".to_string(),
                    input: serde_json::json!({
                        "items": items.len(),
                        "hours_before": hours_before.normalize().to_string(),
                        "hours_after": hours_after.normalize().to_string(),
                        "proration_ratio": proration_ratio.normalize().to_string()
                    }),
                    output: serde_json::json!({
                        "ordinary_wage": ordinary_wage.normalize().to_string(),
                        "company_paid_before": company_paid_before.normalize().to_string(),
                        "company_paid_after": company_paid_after.normalize().to_string()
                    }),
                    reasoning: format!(
                        "{} items: ordinary wage {} of total {}; {} still paid after the reduction",
                        items.len(),
                        ordinary_wage.normalize(),
                        total.normalize(),
                        after.normalize()
                    ),
                },
            }
        }
    }
}
