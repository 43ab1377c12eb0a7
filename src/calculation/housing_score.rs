//! Housing subscription point score.
//!
//! The score is the sum of three capped parts:
//!
//! | Part | Rule | Max |
//! |------|------|-----|
//! | Homeless period | 0 years: 2, else 2 + 2 × years | 32 |
//! | Dependents | 5 + 5 × dependents (0 to 6 counted) | 35 |
//! | Account period | 0 years: 1, half a year: 2, else years + 2 | 17 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

const MAX_HOMELESS_SCORE: Decimal = Decimal::from_parts(32, 0, 0, false, 0);
const MAX_DEPENDENTS_SCORE: Decimal = Decimal::from_parts(35, 0, 0, false, 0);
const MAX_ACCOUNT_SCORE: Decimal = Decimal::from_parts(17, 0, 0, false, 0);
const HALF_YEAR: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
// Both period scores reach their maximum at 15 years.
const SCORED_YEARS: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Dependents beyond this count add nothing.
pub const MAX_COUNTED_DEPENDENTS: i32 = 6;

/// Input for the housing subscription score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingScoreInput {
    /// Years without a home (0 means less than one year).
    pub homeless_years: Decimal,
    /// Dependents, not counting the applicant.
    pub dependents: i32,
    /// Age of the subscription account in years (0 or 0.5 for under a year).
    pub account_years: Decimal,
}

/// The housing subscription score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingScoreResult {
    /// Homeless-period score.
    pub homeless_score: Decimal,
    /// The dependents count that was scored, after clamping.
    pub counted_dependents: i32,
    /// Dependents score.
    pub dependents_score: Decimal,
    /// Account-period score.
    pub account_score: Decimal,
    /// Sum of the three parts.
    pub total_score: Decimal,
    /// One audit step per part.
    pub audit_trace: Vec<AuditStep>,
}

fn homeless_score(years: Decimal) -> Decimal {
    if years <= Decimal::ZERO {
        Decimal::TWO
    } else {
        (Decimal::TWO + Decimal::TWO * years.min(SCORED_YEARS)).min(MAX_HOMELESS_SCORE)
    }
}

fn dependents_score(counted: i32) -> Decimal {
    let five = Decimal::from(5);
    (five + five * Decimal::from(counted)).min(MAX_DEPENDENTS_SCORE)
}

fn account_score(years: Decimal) -> Decimal {
    if years <= Decimal::ZERO {
        Decimal::ONE
    } else if years == HALF_YEAR {
        Decimal::TWO
    } else {
        (years.min(SCORED_YEARS) + Decimal::TWO).min(MAX_ACCOUNT_SCORE)
    }
}

fn score_step(step_number: u32, rule_id: &str, rule_name: &str, value: String, score: Decimal) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({ "value": value }),
        output: serde_json::json!({ "score": score.normalize().to_string() }),
        reasoning: format!("{} scores {} points", value, score.normalize()),
    }
}

/// Calculates the housing subscription score.
///
/// Negative periods score like zero and the dependents count is clamped to
/// `0..=6`.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::{HousingScoreInput, calculate_housing_score};
/// use rust_decimal::Decimal;
///
/// let result = calculate_housing_score(&HousingScoreInput {
///     homeless_years: Decimal::from(15),
///     dependents: 6,
///     account_years: Decimal::from(15),
/// });
/// assert_eq!(result.total_score, Decimal::from(84));
/// ```
pub fn calculate_housing_score(input: &HousingScoreInput) -> HousingScoreResult {
    let counted_dependents = input.dependents.clamp(0, MAX_COUNTED_DEPENDENTS);

    let homeless = homeless_score(input.homeless_years);
    let dependents = dependents_score(counted_dependents);
    let account = account_score(input.account_years);

    let audit_trace = vec![
        score_step(
            1,
            "homeless_period",
            "Homeless Period",
            format!("{} years homeless", input.homeless_years.normalize()),
            homeless,
        ),
        score_step(
            2,
            "dependents",
            "Dependents",
            format!("{} dependents", counted_dependents),
            dependents,
        ),
        score_step(
            3,
            "account_period",
            "Subscription Account Period",
            format!("{} years of account", input.account_years.normalize()),
            account,
        ),
    ];

    HousingScoreResult {
        homeless_score: homeless,
        counted_dependents,
        dependents_score: dependents,
        account_score: account,
        total_score: homeless + dependents + account,
        audit_trace,
    }
}
