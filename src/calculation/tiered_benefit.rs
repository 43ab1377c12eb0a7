//! Two-tier reduced-hours benefit calculation.
//!
//! Reduced weekly hours are split into two bands:
//!
//! - **Tier A:** the first `hours_threshold_tier_a` reduced hours, on a base
//!   of the ordinary wage capped at `cap_tier_a`.
//! - **Tier B:** any reduced hours beyond the threshold, on a base of
//!   `ratio_tier_b` × ordinary wage capped at `cap_tier_b`.
//!
//! Each tier pays `base × tier hours / hours before`. The sum is prorated by
//! the share of the month covered and raised to the prorated monthly floor
//! when it falls below it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, PolicyParameters};

/// The result of the two-tier benefit calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredBenefitResult {
    /// Reduced hours in tier A.
    pub tier_a_hours: Decimal,
    /// Reduced hours in tier B.
    pub tier_b_hours: Decimal,
    /// Tier A amount after proration.
    pub tier_a_amount: Decimal,
    /// Tier B amount after proration.
    pub tier_b_amount: Decimal,
    /// The prorated monthly floor.
    pub floor_amount: Decimal,
    /// The larger of the prorated tier sum and the prorated floor.
    pub benefit: Decimal,
    /// Whether the floor replaced a lower computed amount.
    pub floor_applied: bool,
    /// Audit steps for tier A, tier B and the floor comparison.
    pub audit_steps: Vec<AuditStep>,
}

impl TieredBenefitResult {
    fn none() -> Self {
        Self {
            tier_a_hours: Decimal::ZERO,
            tier_b_hours: Decimal::ZERO,
            tier_a_amount: Decimal::ZERO,
            tier_b_amount: Decimal::ZERO,
            floor_amount: Decimal::ZERO,
            benefit: Decimal::ZERO,
            floor_applied: false,
            audit_steps: Vec::new(),
        }
    }
}

/// Calculates the two-tier benefit with the monthly floor.
///
/// When `reduced_hours` is not positive there is no benefit at all, not even
/// the floor, and no audit steps are produced.
///
/// # Arguments
///
/// * `ordinary_wage` - The monthly ordinary wage
/// * `hours_before` - Weekly hours before the reduction (positive)
/// * `reduced_hours` - Weekly hours removed by the reduction
/// * `proration_ratio` - Share of the month covered
/// * `policy` - The policy parameters in force
/// * `step_number_start` - The starting step number for audit trail sequencing
///
/// # Examples
///
/// ## Reduction within tier A
///
/// ```
/// use benefit_engine::calculation::calculate_tiered_benefit;
/// use benefit_engine::models::PolicyParameters;
/// use rust_decimal::Decimal;
///
/// let policy = PolicyParameters {
///     hours_threshold_tier_a: Decimal::from(10),
///     cap_tier_a: Decimal::from(2_500_000),
///     cap_tier_b: Decimal::from(1_600_000),
///     ratio_tier_b: Decimal::new(8, 1),
///     floor_monthly: Decimal::from(500_000),
/// };
///
/// let result = calculate_tiered_benefit(
///     Decimal::from(3_000_000),
///     Decimal::from(40),
///     Decimal::from(10),
///     Decimal::ONE,
///     &policy,
///     1,
/// );
///
/// // min(3,000,000, 2,500,000) × 10 / 40
/// assert_eq!(result.benefit, Decimal::from(625_000));
/// assert!(!result.floor_applied);
/// ```
pub fn calculate_tiered_benefit(
    ordinary_wage: Decimal,
    hours_before: Decimal,
    reduced_hours: Decimal,
    proration_ratio: Decimal,
    policy: &PolicyParameters,
    step_number_start: u32,
) -> TieredBenefitResult {
    if reduced_hours <= Decimal::ZERO {
        return TieredBenefitResult::none();
    }

    let mut audit_steps = Vec::with_capacity(3);
    let mut step_number = step_number_start;

    let threshold = policy.hours_threshold_tier_a;
    let tier_a_hours = threshold.min(reduced_hours);
    let tier_b_hours = (reduced_hours - threshold).max(Decimal::ZERO);

    let tier_a_base = ordinary_wage.min(policy.cap_tier_a);
    let tier_b_base = (ordinary_wage * policy.ratio_tier_b).min(policy.cap_tier_b);

    let tier_a_monthly = tier_a_base * (tier_a_hours / hours_before);
    let tier_b_monthly = tier_b_base * (tier_b_hours / hours_before);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "tier_a_benefit".to_string(),
        rule_name: "Tier A Benefit".to_string(),
        input: serde_json::json!({
            "ordinary_wage": ordinary_wage.normalize().to_string(),
            "cap": policy.cap_tier_a.normalize().to_string(),
            "hours": tier_a_hours.normalize().to_string(),
            "hours_before": hours_before.normalize().to_string()
        }),
        output: serde_json::json!({
            "base": tier_a_base.normalize().to_string(),
            "monthly_amount": tier_a_monthly.normalize().to_string()
        }),
        reasoning: format!(
            "First {} reduced hours on base min({}, cap {}) = {}: {} × {}/{} = {}",
            tier_a_hours.normalize(),
            ordinary_wage.normalize(),
            policy.cap_tier_a.normalize(),
            tier_a_base.normalize(),
            tier_a_base.normalize(),
            tier_a_hours.normalize(),
            hours_before.normalize(),
            tier_a_monthly.normalize()
        ),
    });
    step_number += 1;

    if tier_b_hours > Decimal::ZERO {
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "tier_b_benefit".to_string(),
            rule_name: "Tier B Benefit".to_string(),
            input: serde_json::json!({
                "ordinary_wage": ordinary_wage.normalize().to_string(),
                "ratio": policy.ratio_tier_b.normalize().to_string(),
                "cap": policy.cap_tier_b.normalize().to_string(),
                "hours": tier_b_hours.normalize().to_string(),
                "hours_before": hours_before.normalize().to_string()
            }),
            output: serde_json::json!({
                "base": tier_b_base.normalize().to_string(),
                "monthly_amount": tier_b_monthly.normalize().to_string()
            }),
            reasoning: format!(
                "{} reduced hours beyond the {} hour threshold on base min({} × {}, cap {}) = {}: {} × {}/{} = {}",
                tier_b_hours.normalize(),
                threshold.normalize(),
                ordinary_wage.normalize(),
                policy.ratio_tier_b.normalize(),
                policy.cap_tier_b.normalize(),
                tier_b_base.normalize(),
                tier_b_base.normalize(),
                tier_b_hours.normalize(),
                hours_before.normalize(),
                tier_b_monthly.normalize()
            ),
        });
        step_number += 1;
    }

    let raw_total = (tier_a_monthly + tier_b_monthly) * proration_ratio;
    let floor_amount = policy.floor_monthly * proration_ratio;
    let floor_applied = floor_amount > raw_total;
    let benefit = raw_total.max(floor_amount);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "benefit_floor".to_string(),
        rule_name: "Monthly Floor".to_string(),
        input: serde_json::json!({
            "computed": raw_total.normalize().to_string(),
            "floor_monthly": policy.floor_monthly.normalize().to_string(),
            "proration_ratio": proration_ratio.normalize().to_string()
        }),
        output: serde_json::json!({
            "benefit": benefit.normalize().to_string(),
            "floor_applied": floor_applied
        }),
        reasoning: if floor_applied {
            format!(
                "Computed {} is below the prorated floor {}; floor applies",
                raw_total.normalize(),
                floor_amount.normalize()
            )
        } else {
            format!(
                "Computed {} is not below the prorated floor {}",
                raw_total.normalize(),
                floor_amount.normalize()
            )
        },
    });

    TieredBenefitResult {
        tier_a_hours,
        tier_b_hours,
        tier_a_amount: tier_a_monthly * proration_ratio,
        tier_b_amount: tier_b_monthly * proration_ratio,
        floor_amount,
        benefit,
        floor_applied,
        audit_steps,
    }
}
