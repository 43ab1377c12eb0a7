//! Calculation logic for the Benefit Engine.
//!
//! This module contains the childcare reduced-hours benefit pipeline (policy
//! lookup, proration, wage base, two-tier benefit with floor, offset, and the
//! [`calculate`] orchestrator) together with the housing subscription score,
//! unemployment benefit and youth savings calculators.

mod childcare;
mod housing_score;
mod offset;
mod policy;
mod proration;
mod tiered_benefit;
mod unemployment;
mod wage_base;
mod youth_leap;

pub use childcare::{
    FLOOR_APPLIED_WARNING, NO_REDUCTION_WARNING, OFFSET_APPLIED_WARNING, calculate,
    validate_input,
};
pub use housing_score::{
    HousingScoreInput, HousingScoreResult, MAX_COUNTED_DEPENDENTS, calculate_housing_score,
};
pub use offset::{OffsetResult, apply_offset};
pub use policy::{resolve_policy, resolve_policy_with};
pub use proration::{
    ProrationRatio, RATIO_DECIMAL_PLACES, SPANS_MONTHS_WARNING, days_in_month,
    resolve_proration_ratio,
};
pub use tiered_benefit::{TieredBenefitResult, calculate_tiered_benefit};
pub use unemployment::{
    DailyLimit, UnemploymentInput, UnemploymentResult, calculate_unemployment_benefit,
};
pub use wage_base::{WageBaseResult, calculate_wage_base, validate_wage_input};
pub use youth_leap::{YouthLeapInput, YouthLeapResult, calculate_youth_leap};
