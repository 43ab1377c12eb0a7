//! Offset of the benefit against company pay.
//!
//! When enabled, company pay after the reduction plus the benefit may not
//! exceed the prorated reference wage. Any excess comes off the benefit,
//! never off the company pay, and the benefit never drops below zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, OffsetRule};

/// The result of applying the offset rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetResult {
    /// The monthly reference wage used.
    pub reference_base: Decimal,
    /// The reference wage after proration.
    pub capped_reference: Decimal,
    /// The benefit after the offset.
    pub benefit: Decimal,
    /// The amount taken off the benefit.
    pub reduction: Decimal,
    /// The audit step recording the offset check.
    pub audit_step: AuditStep,
}

/// Applies the offset rule to a benefit.
///
/// The reference wage is `rule.cap_reference` when positive and the ordinary
/// wage otherwise. The benefit is limited to the headroom between company pay
/// and the prorated reference, so feeding the returned benefit back in with the
/// same arguments leaves it unchanged.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::apply_offset;
/// use benefit_engine::models::OffsetRule;
/// use rust_decimal::Decimal;
///
/// let result = apply_offset(
///     Decimal::from(625_000),
///     Decimal::from(2_500_000),
///     Decimal::from(3_000_000),
///     &OffsetRule::default(),
///     Decimal::ONE,
///     1,
/// );
///
/// assert_eq!(result.benefit, Decimal::from(500_000));
/// assert_eq!(result.reduction, Decimal::from(125_000));
/// ```
pub fn apply_offset(
    benefit: Decimal,
    company_paid_after: Decimal,
    ordinary_wage: Decimal,
    rule: &OffsetRule,
    proration_ratio: Decimal,
    step_number: u32,
) -> OffsetResult {
    let reference_base = if rule.cap_reference > Decimal::ZERO {
        rule.cap_reference
    } else {
        ordinary_wage
    };
    let capped_reference = reference_base * proration_ratio;
    let headroom = capped_reference - company_paid_after;

    let adjusted = if benefit > headroom {
        headroom.max(Decimal::ZERO)
    } else {
        benefit
    };
    let reduction = benefit - adjusted;

    let reasoning = if reduction > Decimal::ZERO {
        format!(
            "Company pay {} + benefit {} exceeds reference {}; benefit reduced by {} to {}",
            company_paid_after.normalize(),
            benefit.normalize(),
            capped_reference.normalize(),
            reduction.normalize(),
            adjusted.normalize()
        )
    } else {
        format!(
            "Company pay {} + benefit {} within reference {}; no reduction",
            company_paid_after.normalize(),
            benefit.normalize(),
            capped_reference.normalize()
        )
    };

    OffsetResult {
        reference_base,
        capped_reference,
        benefit: adjusted,
        reduction,
        audit_step: AuditStep {
            step_number,
            rule_id: "benefit_offset".to_string(),
            rule_name: "Benefit Offset".to_string(),
            input: serde_json::json!({
                "benefit": benefit.normalize().to_string(),
                "company_paid_after": company_paid_after.normalize().to_string(),
                "reference_base": reference_base.normalize().to_string(),
                "proration_ratio": proration_ratio.normalize().to_string()
            }),
            output: serde_json::json!({
                "benefit": adjusted.normalize().to_string(),
                "reduction": reduction.normalize().to_string()
            }),
            reasoning,
        },
    }
}
