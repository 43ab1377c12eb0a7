//! Unemployment (job-seeking) benefit estimate.
//!
//! The daily benefit is 60% of the average daily wage, kept within the
//! statutory daily limits and truncated to whole won. The number of benefit
//! days depends on the insured period and on whether the claimant is at or
//! over the priority age or disabled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::UnemploymentConfig;
use crate::error::{EngineError, EngineResult, ValidationError};
use crate::models::AuditStep;

/// Input for the unemployment benefit estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnemploymentInput {
    /// Age at separation.
    pub age: u32,
    /// Whether the claimant is registered as disabled.
    #[serde(default)]
    pub is_disabled: bool,
    /// Whole years of insured employment.
    pub insured_years: u32,
    /// Additional months of insured employment.
    #[serde(default)]
    pub insured_months: u32,
    /// Average monthly wage over the last three months.
    pub average_monthly_wage: Decimal,
}

/// Which statutory limit replaced the computed daily amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyLimit {
    /// The computed amount was above the upper limit.
    Upper,
    /// The computed amount was below the lower limit.
    Lower,
}

/// The unemployment benefit estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnemploymentResult {
    /// Insured period in years, months included as twelfths.
    pub insured_period_years: Decimal,
    /// Whether the priority (longer) duration column was used.
    pub priority: bool,
    /// Number of benefit days.
    pub benefit_days: u32,
    /// The daily amount before the limits.
    pub computed_daily: Decimal,
    /// The limit that applied, if any.
    pub applied_limit: Option<DailyLimit>,
    /// The daily benefit in whole won.
    pub daily_benefit: Decimal,
    /// `daily_benefit × benefit_days`.
    pub total_benefit: Decimal,
    /// Audit steps for the duration and the daily amount.
    pub audit_trace: Vec<AuditStep>,
}

/// Estimates the unemployment benefit.
///
/// # Errors
///
/// Returns `InvalidInput` with `MissingAverageWage` when the average monthly
/// wage is not positive, or `InvalidConfig` if the duration table is empty.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::{UnemploymentInput, calculate_unemployment_benefit};
/// use benefit_engine::config::UnemploymentConfig;
/// use rust_decimal::Decimal;
///
/// let input = UnemploymentInput {
///     age: 35,
///     is_disabled: false,
///     insured_years: 2,
///     insured_months: 0,
///     average_monthly_wage: Decimal::from(3_200_000),
/// };
/// let result = calculate_unemployment_benefit(&input, &UnemploymentConfig::builtin()).unwrap();
///
/// assert_eq!(result.daily_benefit, Decimal::from(64_000));
/// assert_eq!(result.benefit_days, 150);
/// assert_eq!(result.total_benefit, Decimal::from(9_600_000));
/// ```
pub fn calculate_unemployment_benefit(
    input: &UnemploymentInput,
    config: &UnemploymentConfig,
) -> EngineResult<UnemploymentResult> {
    if input.average_monthly_wage <= Decimal::ZERO {
        return Err(ValidationError::MissingAverageWage.into());
    }

    let insured_period_years =
        Decimal::from(input.insured_years) + Decimal::from(input.insured_months) / Decimal::from(12);
    let priority = input.age >= config.priority_age || input.is_disabled;

    let band = config
        .duration_table
        .iter()
        .rev()
        .find(|band| band.min_insured_years <= insured_period_years)
        .or_else(|| config.duration_table.first())
        .ok_or_else(|| EngineError::InvalidConfig {
            message: "unemployment duration table has no rows".to_string(),
        })?;
    let benefit_days = if priority {
        band.days_priority
    } else {
        band.days_standard
    };

    let computed_daily =
        input.average_monthly_wage / config.days_per_month * config.replacement_rate;
    let (limited, applied_limit) = if computed_daily > config.daily_upper_limit {
        (config.daily_upper_limit, Some(DailyLimit::Upper))
    } else if computed_daily < config.daily_lower_limit {
        (config.daily_lower_limit, Some(DailyLimit::Lower))
    } else {
        (computed_daily, None)
    };
    let daily_benefit = limited.floor();
    let total_benefit = daily_benefit * Decimal::from(benefit_days);

    let audit_trace = vec![
        AuditStep {
            step_number: 1,
            rule_id: "benefit_duration".to_string(),
            rule_name: "Benefit Duration".to_string(),
            input: serde_json::json!({
                "age": input.age,
                "is_disabled": input.is_disabled,
                "insured_period_years": insured_period_years.round_dp(2).normalize().to_string()
            }),
            output: serde_json::json!({
                "benefit_days": benefit_days,
                "priority": priority
            }),
            reasoning: format!(
                "Insured {} years and {} months falls in the band from {} years; {} column gives {} days",
                input.insured_years,
                input.insured_months,
                band.min_insured_years.normalize(),
                if priority { "priority" } else { "standard" },
                benefit_days
            ),
        },
        AuditStep {
            step_number: 2,
            rule_id: "daily_benefit".to_string(),
            rule_name: "Daily Benefit".to_string(),
            input: serde_json::json!({
                "average_monthly_wage": input.average_monthly_wage.normalize().to_string(),
                "replacement_rate": config.replacement_rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "computed_daily": computed_daily.round_dp(2).normalize().to_string(),
                "daily_benefit": daily_benefit.normalize().to_string(),
                "applied_limit": applied_limit
            }),
            reasoning: match applied_limit {
                Some(DailyLimit::Upper) => format!(
                    "{} / {} × {} exceeds the upper limit; {} per day",
                    input.average_monthly_wage.normalize(),
                    config.days_per_month.normalize(),
                    config.replacement_rate.normalize(),
                    daily_benefit.normalize()
                ),
                Some(DailyLimit::Lower) => format!(
                    "{} / {} × {} is below the lower limit; {} per day",
                    input.average_monthly_wage.normalize(),
                    config.days_per_month.normalize(),
                    config.replacement_rate.normalize(),
                    daily_benefit.normalize()
                ),
                None => format!(
                    "{} / {} × {} = {} per day",
                    input.average_monthly_wage.normalize(),
                    config.days_per_month.normalize(),
                    config.replacement_rate.normalize(),
                    daily_benefit.normalize()
                ),
            },
        },
    ];

    Ok(UnemploymentResult {
        insured_period_years,
        priority,
        benefit_days,
        computed_daily,
        applied_limit,
        daily_benefit,
        total_benefit,
        audit_trace,
    })
}
