//! Childcare reduced-hours benefit calculation.
//!
//! [`calculate`] validates a [`CalculationInput`], then runs the wage base,
//! two-tier benefit, floor and offset rules in order. It is a pure function:
//! the same input always gives the same result, and nothing is rounded until
//! the figures are formatted for display.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult, ValidationError};
use crate::models::{
    AuditStep, CalculationInput, CalculationResult, CalculationWarning, HOURS_PER_WEEK,
    MAX_MONEY_AMOUNT, PolicyParameters, WarningSeverity,
};

use super::offset::apply_offset;
use super::tiered_benefit::calculate_tiered_benefit;
use super::wage_base::{calculate_wage_base, check_money, validate_wage_input};

/// Warning code raised when the floor replaced a lower computed benefit.
pub const FLOOR_APPLIED_WARNING: &str = "FLOOR_APPLIED";

/// Warning code raised when the offset rule reduced the benefit.
pub const OFFSET_APPLIED_WARNING: &str = "OFFSET_APPLIED";

/// Warning code raised when hours were not actually reduced.
pub const NO_REDUCTION_WARNING: &str = "NO_REDUCTION";

/// Checks a calculation input, returning every problem found.
///
/// Hours must be positive with hours after not above hours before, the period
/// must not end before it starts, the proration ratio must lie in [0, 1], and
/// the wage input must pass [`validate_wage_input`]. Policy values and the
/// offset reference must lie within their ranges.
pub fn validate_input(input: &CalculationInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
        if end < start {
            errors.push(ValidationError::EndBeforeStart { start, end });
        }
    }

    if input.hours_before <= Decimal::ZERO {
        errors.push(ValidationError::NonPositiveHoursBefore);
    }
    if input.hours_after <= Decimal::ZERO {
        errors.push(ValidationError::NonPositiveHoursAfter);
    }
    if input.hours_after > input.hours_before {
        errors.push(ValidationError::HoursAfterExceedBefore {
            before: input.hours_before,
            after: input.hours_after,
        });
    }

    if input.proration_ratio < Decimal::ZERO || input.proration_ratio > Decimal::ONE {
        errors.push(ValidationError::RatioOutOfRange {
            ratio: input.proration_ratio,
        });
    }

    errors.extend(validate_wage_input(&input.wage));
    errors.extend(validate_policy(&input.policy));

    if let Some(rule) = &input.offset {
        check_money(&mut errors, "offset reference wage", rule.cap_reference);
    }

    errors
}

fn validate_policy(policy: &PolicyParameters) -> Vec<ValidationError> {
    let limits = [
        ("tier A hours threshold", policy.hours_threshold_tier_a, HOURS_PER_WEEK),
        ("tier A cap", policy.cap_tier_a, MAX_MONEY_AMOUNT),
        ("tier B cap", policy.cap_tier_b, MAX_MONEY_AMOUNT),
        ("tier B ratio", policy.ratio_tier_b, Decimal::ONE),
        ("monthly floor", policy.floor_monthly, MAX_MONEY_AMOUNT),
    ];

    limits
        .into_iter()
        .filter(|(_, value, max)| *value < Decimal::ZERO || value > max)
        .map(|(field, value, max)| ValidationError::ValueOutOfRange {
            field: field.to_string(),
            value,
            max,
        })
        .collect()
}

/// Calculates the childcare reduced-hours benefit.
///
/// # Returns
///
/// The full [`CalculationResult`], or `InvalidInput` carrying every failed
/// check from [`validate_input`]. No partial figures are returned on error.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::{calculate, resolve_policy};
/// use benefit_engine::models::{CalculationInput, WageInput};
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput {
///     start_date: None,
///     end_date: None,
///     hours_before: Decimal::from(40),
///     hours_after: Decimal::from(30),
///     wage: WageInput::Direct {
///         ordinary_wage: Decimal::from(3_000_000),
///         company_paid_override: None,
///     },
///     proration_ratio: Decimal::ONE,
///     policy: resolve_policy("2026-01-01").unwrap(),
///     offset: None,
/// };
///
/// let result = calculate(&input).unwrap();
/// assert_eq!(result.total_benefit, Decimal::from(625_000));
/// assert_eq!(result.grand_total_income, Decimal::from(2_875_000));
/// ```
pub fn calculate(input: &CalculationInput) -> EngineResult<CalculationResult> {
    let errors = validate_input(input);
    if !errors.is_empty() {
        return Err(EngineError::InvalidInput { errors });
    }

    let ratio = input.proration_ratio;
    let mut audit_trace: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<CalculationWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let wage_base = calculate_wage_base(
        &input.wage,
        input.hours_before,
        input.hours_after,
        ratio,
        step_number,
    );
    audit_trace.push(wage_base.audit_step.clone());
    step_number += 1;

    let reduced_hours = input.hours_before - input.hours_after;
    let hours_ratio = input.hours_after / input.hours_before;

    if reduced_hours <= Decimal::ZERO {
        warnings.push(CalculationWarning::new(
            NO_REDUCTION_WARNING,
            "hours after reduction equal hours before; no benefit is payable",
            WarningSeverity::Info,
        ));

        return Ok(CalculationResult {
            ordinary_wage_base: wage_base.ordinary_wage,
            reduced_hours: Decimal::ZERO,
            hours_ratio,
            benefit_tier_a: Decimal::ZERO,
            benefit_tier_b: Decimal::ZERO,
            total_benefit: Decimal::ZERO,
            floor_applied: false,
            offset_reduction: Decimal::ZERO,
            company_paid_before: wage_base.company_paid_before,
            company_paid_after: wage_base.company_paid_after,
            company_pay_basis: wage_base.basis,
            grand_total_income: wage_base.company_paid_after,
            warnings,
            audit_trace,
        });
    }

    let tiered = calculate_tiered_benefit(
        wage_base.ordinary_wage,
        input.hours_before,
        reduced_hours,
        ratio,
        &input.policy,
        step_number,
    );
    step_number += tiered.audit_steps.len() as u32;
    audit_trace.extend(tiered.audit_steps);

    if tiered.floor_applied {
        warnings.push(CalculationWarning::new(
            FLOOR_APPLIED_WARNING,
            format!(
                "computed benefit is below the monthly floor; the prorated floor of {} applies",
                tiered.floor_amount.normalize()
            ),
            WarningSeverity::Info,
        ));
    }

    let mut total_benefit = tiered.benefit;
    let mut offset_reduction = Decimal::ZERO;

    if let Some(rule) = &input.offset {
        let offset = apply_offset(
            total_benefit,
            wage_base.company_paid_after,
            wage_base.ordinary_wage,
            rule,
            ratio,
            step_number,
        );
        audit_trace.push(offset.audit_step);

        if offset.reduction > Decimal::ZERO {
            warnings.push(CalculationWarning::new(
                OFFSET_APPLIED_WARNING,
                format!(
                    "company pay plus benefit exceeded the reference wage of {}; benefit reduced by {}",
                    offset.capped_reference.normalize(),
                    offset.reduction.normalize()
                ),
                WarningSeverity::Info,
            ));
        }

        total_benefit = offset.benefit;
        offset_reduction = offset.reduction;
    }

    Ok(CalculationResult {
        ordinary_wage_base: wage_base.ordinary_wage,
        reduced_hours,
        hours_ratio,
        benefit_tier_a: tiered.tier_a_amount,
        benefit_tier_b: tiered.tier_b_amount,
        total_benefit,
        floor_applied: tiered.floor_applied,
        offset_reduction,
        company_paid_before: wage_base.company_paid_before,
        company_paid_after: wage_base.company_paid_after,
        company_pay_basis: wage_base.basis,
        grand_total_income: wage_base.company_paid_after + total_benefit,
        warnings,
        audit_trace,
    })
}
