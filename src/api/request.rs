//! Request types for the Benefit Engine API.
//!
//! The childcare request mirrors the calculator form: numbers may arrive as
//! JSON numbers or as locale-formatted text, and the auto-policy and
//! auto-ratio switches ask the server to fill those fields from the dates.
//! [`ChildcareRequest::prepare`] turns the form into a [`CalculationInput`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::resolve_proration_ratio;
use crate::config::PolicyTable;
use crate::error::EngineResult;
use crate::format::{parse_amount, parse_date};
use crate::models::{
    CalculationInput, CalculationWarning, IncomeItem, OffsetRule, PayMode, PolicyParameters,
    WageInput,
};

/// A numeric form field, sent either as a JSON number or as text.
///
/// Text is parsed with thousands separators ignored. Text that does not parse
/// reads as zero, which the calculators then reject where a positive value is
/// required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    /// A JSON number.
    Number(Decimal),
    /// Text as typed into the form.
    Text(String),
}

impl FormNumber {
    /// Returns the numeric value, reading unparseable text as zero.
    pub fn value(&self) -> Decimal {
        match self {
            FormNumber::Number(value) => *value,
            FormNumber::Text(text) => parse_amount(text).unwrap_or(Decimal::ZERO),
        }
    }

    fn parsed(&self) -> Option<Decimal> {
        match self {
            FormNumber::Number(value) => Some(*value),
            FormNumber::Text(text) => parse_amount(text),
        }
    }
}

impl Default for FormNumber {
    fn default() -> Self {
        FormNumber::Text(String::new())
    }
}

impl From<Decimal> for FormNumber {
    fn from(value: Decimal) -> Self {
        FormNumber::Number(value)
    }
}

impl From<&str> for FormNumber {
    fn from(text: &str) -> Self {
        FormNumber::Text(text.to_string())
    }
}

/// Which wage entry mode the form is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WageModeRequest {
    /// A single ordinary wage figure.
    #[default]
    Direct,
    /// An itemized pay slip.
    Detailed,
}

/// One row of the itemized pay slip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeItemRequest {
    /// Row label.
    #[serde(default)]
    pub label: String,
    /// Monthly amount.
    #[serde(default)]
    pub amount: FormNumber,
    /// Whether the row counts toward the ordinary wage.
    #[serde(default)]
    pub counts_as_ordinary_wage: bool,
    /// How the row is paid after the reduction.
    #[serde(default)]
    pub pay_mode: PayMode,
}

/// Manually entered policy fields. Empty fields fall back to the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyFieldsRequest {
    /// Reduced hours covered by tier A.
    #[serde(default)]
    pub hours_threshold_tier_a: Option<FormNumber>,
    /// Tier A wage cap.
    #[serde(default)]
    pub cap_tier_a: Option<FormNumber>,
    /// Tier B wage cap.
    #[serde(default)]
    pub cap_tier_b: Option<FormNumber>,
    /// Tier B wage multiplier.
    #[serde(default)]
    pub ratio_tier_b: Option<FormNumber>,
    /// Monthly floor.
    #[serde(default)]
    pub floor_monthly: Option<FormNumber>,
}

/// Request body for `POST /childcare/calculate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildcareRequest {
    /// Reduction start date, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Reduction end date, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Weekly hours before the reduction.
    #[serde(default)]
    pub hours_before: FormNumber,
    /// Weekly hours after the reduction.
    #[serde(default)]
    pub hours_after: FormNumber,
    /// Wage entry mode.
    #[serde(default)]
    pub wage_mode: WageModeRequest,
    /// Ordinary wage (direct mode).
    #[serde(default)]
    pub ordinary_wage: FormNumber,
    /// Total monthly pay (direct mode, optional).
    #[serde(default)]
    pub total_monthly_pay: Option<FormNumber>,
    /// Pay slip rows (detailed mode).
    #[serde(default)]
    pub items: Vec<IncomeItemRequest>,
    /// Share of the month covered; 1 when omitted.
    #[serde(default)]
    pub proration_ratio: Option<FormNumber>,
    /// Derive the ratio from the dates.
    #[serde(default)]
    pub auto_ratio: bool,
    /// Derive thresholds, caps and floor from the start date. An entered tier B
    /// ratio still applies.
    #[serde(default)]
    pub auto_policy: bool,
    /// Manually entered policy fields.
    #[serde(default)]
    pub policy: PolicyFieldsRequest,
    /// Apply the offset against company pay.
    #[serde(default)]
    pub apply_offset: bool,
    /// Reference wage for the offset; the ordinary wage when empty.
    #[serde(default)]
    pub cap_reference: Option<FormNumber>,
}

impl ChildcareRequest {
    /// Builds the calculation input, resolving policy and ratio as requested.
    ///
    /// Returns the input with any warnings raised while resolving. An end
    /// date before the start date stops an auto-ratio request here; every
    /// other check is left to the calculator.
    pub fn prepare(
        &self,
        policies: &PolicyTable,
    ) -> EngineResult<(CalculationInput, Vec<CalculationWarning>)> {
        let start_date = self.start_date.as_deref().and_then(parse_date);
        let end_date = self.end_date.as_deref().and_then(parse_date);
        let mut warnings = Vec::new();

        let policy = self.resolve_policy(policies, start_date);

        let mut proration_ratio = self
            .proration_ratio
            .as_ref()
            .map(FormNumber::value)
            .unwrap_or(Decimal::ONE);
        if self.auto_ratio {
            if let (Some(start), Some(end)) = (start_date, end_date) {
                let resolved = resolve_proration_ratio(start, end)?;
                proration_ratio = resolved.apply_to(proration_ratio);
                warnings.extend(resolved.warning().cloned());
            }
        }

        let wage = match self.wage_mode {
            WageModeRequest::Direct => WageInput::Direct {
                ordinary_wage: self.ordinary_wage.value(),
                company_paid_override: self.total_monthly_pay.as_ref().and_then(FormNumber::parsed),
            },
            WageModeRequest::Detailed => WageInput::Detailed {
                items: self
                    .items
                    .iter()
                    .map(|item| {
                        IncomeItem::new(
                            item.label.clone(),
                            item.amount.value(),
                            item.counts_as_ordinary_wage,
                            item.pay_mode,
                        )
                    })
                    .collect(),
            },
        };

        let offset = self.apply_offset.then(|| OffsetRule {
            cap_reference: self
                .cap_reference
                .as_ref()
                .map(FormNumber::value)
                .unwrap_or(Decimal::ZERO),
        });

        let input = CalculationInput {
            start_date,
            end_date,
            hours_before: self.hours_before.value(),
            hours_after: self.hours_after.value(),
            wage,
            proration_ratio,
            policy,
            offset,
        };

        Ok((input, warnings))
    }

    fn resolve_policy(&self, policies: &PolicyTable, start_date: Option<NaiveDate>) -> PolicyParameters {
        let fallback = policies.policy_for_date(start_date.unwrap_or(NaiveDate::MAX));
        let field = |entered: &Option<FormNumber>, default: Decimal| {
            entered.as_ref().and_then(FormNumber::parsed).unwrap_or(default)
        };

        // The table fixes thresholds, caps and floor; the tier B ratio stays user-set.
        if self.auto_policy && start_date.is_some() {
            return PolicyParameters {
                ratio_tier_b: field(&self.policy.ratio_tier_b, fallback.ratio_tier_b),
                ..fallback
            };
        }

        PolicyParameters {
            hours_threshold_tier_a: field(
                &self.policy.hours_threshold_tier_a,
                fallback.hours_threshold_tier_a,
            ),
            cap_tier_a: field(&self.policy.cap_tier_a, fallback.cap_tier_a),
            cap_tier_b: field(&self.policy.cap_tier_b, fallback.cap_tier_b),
            ratio_tier_b: field(&self.policy.ratio_tier_b, fallback.ratio_tier_b),
            floor_monthly: field(&self.policy.floor_monthly, fallback.floor_monthly),
        }
    }
}

/// Request body for `POST /childcare/policy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRequest {
    /// The date to look up, `YYYY-MM-DD`.
    pub date: String,
}

/// Request body for `POST /childcare/ratio`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioRequest {
    /// Reduction start date.
    pub start_date: NaiveDate,
    /// Reduction end date.
    pub end_date: NaiveDate,
}
