//! Youth savings account (youth leap account) projection.
//!
//! Projects the balance at maturity of a fixed monthly installment: the
//! deposits themselves, the government matching contribution for the
//! holder's income band, and simple installment interest. Interest is tax
//! free for eligible holders; above the income cap the account is not
//! available and the projection shows ordinary taxed savings instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ContributionTier, YouthLeapConfig};
use crate::error::{EngineError, EngineResult, ValidationError};
use crate::models::AuditStep;

use super::wage_base::check_money;

/// Input for the youth savings projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouthLeapInput {
    /// Annual personal income in units of 10,000 won.
    pub annual_income: Decimal,
    /// Monthly installment in won.
    pub monthly_deposit: Decimal,
    /// Annual bank interest rate in percent.
    pub annual_rate_percent: Decimal,
}

/// The youth savings projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouthLeapResult {
    /// Whether the income is within the cap.
    pub eligible: bool,
    /// Whether the interest is tax free.
    pub tax_free: bool,
    /// The matching band applied, if any.
    pub tier: Option<ContributionTier>,
    /// Total deposited over the term.
    pub total_principal: Decimal,
    /// Monthly government contribution in whole won.
    pub monthly_contribution: Decimal,
    /// Government contribution over the term.
    pub total_contribution: Decimal,
    /// Interest over the term, after tax, in whole won.
    pub total_interest: Decimal,
    /// Principal, contribution and interest together.
    pub grand_total: Decimal,
    /// Gain over the principal in percent.
    pub return_rate_percent: Decimal,
    /// Audit steps for contribution and interest.
    pub audit_trace: Vec<AuditStep>,
}

/// Projects a youth savings account at maturity.
///
/// # Errors
///
/// Returns `InvalidInput` with `MissingMonthlyDeposit` when the monthly
/// deposit is not positive, and `ValueOutOfRange` when the deposit exceeds
/// [`MAX_MONEY_AMOUNT`](crate::models::MAX_MONEY_AMOUNT) or the rate lies
/// outside 0-100%.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::{YouthLeapInput, calculate_youth_leap};
/// use benefit_engine::config::YouthLeapConfig;
/// use rust_decimal::Decimal;
///
/// let input = YouthLeapInput {
///     annual_income: Decimal::from(2_400),
///     monthly_deposit: Decimal::from(700_000),
///     annual_rate_percent: Decimal::ZERO,
/// };
/// let result = calculate_youth_leap(&input, &YouthLeapConfig::builtin()).unwrap();
///
/// assert_eq!(result.monthly_contribution, Decimal::from(24_000));
/// assert_eq!(result.total_contribution, Decimal::from(1_440_000));
/// ```
pub fn calculate_youth_leap(
    input: &YouthLeapInput,
    config: &YouthLeapConfig,
) -> EngineResult<YouthLeapResult> {
    let mut errors = Vec::new();
    if input.monthly_deposit <= Decimal::ZERO {
        errors.push(ValidationError::MissingMonthlyDeposit);
    }
    check_money(&mut errors, "monthly deposit", input.monthly_deposit);
    if input.annual_rate_percent < Decimal::ZERO
        || input.annual_rate_percent > Decimal::ONE_HUNDRED
    {
        errors.push(ValidationError::ValueOutOfRange {
            field: "annual interest rate".to_string(),
            value: input.annual_rate_percent,
            max: Decimal::ONE_HUNDRED,
        });
    }
    if !errors.is_empty() {
        return Err(EngineError::InvalidInput { errors });
    }

    let term = Decimal::from(config.term_months);
    let eligible = input.annual_income <= config.income_cap;
    let tax_free = eligible;

    let tier = if eligible {
        config
            .contribution_tiers
            .iter()
            .find(|tier| input.annual_income <= tier.income_limit)
            .copied()
    } else {
        None
    };

    let monthly_contribution = match tier {
        Some(tier) if tier.match_ratio > Decimal::ZERO => {
            (input.monthly_deposit.min(tier.match_limit) * tier.match_ratio).floor()
        }
        _ => Decimal::ZERO,
    };
    let total_contribution = monthly_contribution * term;
    let total_principal = input.monthly_deposit * term;

    // Installment interest: deposit × n(n+1)/2 months × monthly rate.
    let deposit_months = term * (term + Decimal::ONE) / Decimal::TWO;
    let gross_interest = input.monthly_deposit * deposit_months * input.annual_rate_percent
        / Decimal::from(1_200);
    let net_interest = if tax_free {
        gross_interest
    } else {
        gross_interest * (Decimal::ONE - config.interest_tax_rate)
    };
    let total_interest = net_interest.floor();

    let grand_total = total_principal + total_contribution + total_interest;
    let return_rate_percent =
        (grand_total - total_principal) / total_principal * Decimal::ONE_HUNDRED;

    let audit_trace = vec![
        AuditStep {
            step_number: 1,
            rule_id: "government_contribution".to_string(),
            rule_name: "Government Contribution".to_string(),
            input: serde_json::json!({
                "annual_income": input.annual_income.normalize().to_string(),
                "monthly_deposit": input.monthly_deposit.normalize().to_string()
            }),
            output: serde_json::json!({
                "eligible": eligible,
                "monthly_contribution": monthly_contribution.normalize().to_string(),
                "total_contribution": total_contribution.normalize().to_string()
            }),
            reasoning: match tier {
                Some(tier) => format!(
                    "Income {} is within the {} band: min({}, {}) × {} = {} per month for {} months",
                    input.annual_income.normalize(),
                    tier.income_limit.normalize(),
                    input.monthly_deposit.normalize(),
                    tier.match_limit.normalize(),
                    tier.match_ratio.normalize(),
                    monthly_contribution.normalize(),
                    config.term_months
                ),
                None if eligible => format!(
                    "Income {} is in no matching band; no contribution",
                    input.annual_income.normalize()
                ),
                None => format!(
                    "Income {} exceeds the cap of {}; not eligible",
                    input.annual_income.normalize(),
                    config.income_cap.normalize()
                ),
            },
        },
        AuditStep {
            step_number: 2,
            rule_id: "installment_interest".to_string(),
            rule_name: "Installment Interest".to_string(),
            input: serde_json::json!({
                "monthly_deposit": input.monthly_deposit.normalize().to_string(),
                "annual_rate_percent": input.annual_rate_percent.normalize().to_string(),
                "term_months": config.term_months
            }),
            output: serde_json::json!({
                "gross_interest": gross_interest.round_dp(2).normalize().to_string(),
                "total_interest": total_interest.normalize().to_string(),
                "tax_free": tax_free
            }),
            reasoning: if tax_free {
                format!(
                    "Simple interest over {} deposit-months at {}% is {}; tax free",
                    deposit_months.normalize(),
                    input.annual_rate_percent.normalize(),
                    total_interest.normalize()
                )
            } else {
                format!(
                    "Simple interest over {} deposit-months at {}% taxed at {} leaves {}",
                    deposit_months.normalize(),
                    input.annual_rate_percent.normalize(),
                    config.interest_tax_rate.normalize(),
                    total_interest.normalize()
                )
            },
        },
    ];

    Ok(YouthLeapResult {
        eligible,
        tax_free,
        tier,
        total_principal,
        monthly_contribution,
        total_contribution,
        total_interest,
        grand_total,
        return_rate_percent,
        audit_trace,
    })
}
