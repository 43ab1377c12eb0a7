//! Input models for the childcare reduced-hours benefit calculator.
//!
//! This module contains the [`CalculationInput`] type and the pieces it is
//! assembled from: the [`PolicyParameters`] in force for the reduction period,
//! the wage figures in either direct or itemized form, and the optional
//! [`OffsetRule`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest money amount a calculator accepts: 1,000,000,000,000,000 won.
///
/// Every sum and product the calculators form stays well inside `Decimal`'s
/// range when each amount is at most this value.
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Hours in a week, the largest weekly hours value a policy may name.
pub const HOURS_PER_WEEK: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

/// The statutory constants used by the two-tier benefit formula.
///
/// A set of parameters is selected by effective date from a
/// [`PolicyTable`](crate::config::PolicyTable).
///
/// # Example
///
/// ```
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
/// assert_eq!(policy.ratio_tier_b.to_string(), "0.8");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyParameters {
    /// Weekly reduced hours paid at the tier A rate.
    pub hours_threshold_tier_a: Decimal,
    /// Monthly cap on the tier A wage base.
    pub cap_tier_a: Decimal,
    /// Monthly cap on the tier B wage base.
    pub cap_tier_b: Decimal,
    /// Share of the ordinary wage used as the tier B base (0-1).
    pub ratio_tier_b: Decimal,
    /// Minimum monthly benefit.
    pub floor_monthly: Decimal,
}

/// How an income item is paid by the employer once hours are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayMode {
    /// Reduced in proportion to the hours ratio.
    #[default]
    Proportional,
    /// Paid in full regardless of the reduction.
    FullPay,
    /// No longer paid.
    NoPay,
}

/// A single line of monthly income in the detailed input mode.
///
/// # Example
///
/// ```
/// use benefit_engine::models::{IncomeItem, PayMode};
/// use rust_decimal::Decimal;
///
/// let item = IncomeItem {
///     label: "Base pay".to_string(),
///     monthly_amount: Decimal::from(2_500_000),
///     counts_as_ordinary_wage: true,
///     pay_mode: PayMode::Proportional,
/// };
/// assert!(item.counts_as_ordinary_wage);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeItem {
    /// A free-text name for the item.
    #[serde(default)]
    pub label: String,
    /// The monthly amount in won.
    pub monthly_amount: Decimal,
    /// Whether the item is part of the ordinary wage (the benefit base).
    pub counts_as_ordinary_wage: bool,
    /// How the employer keeps paying this item after the reduction.
    #[serde(default)]
    pub pay_mode: PayMode,
}

impl IncomeItem {
    /// Creates an income item.
    pub fn new(
        label: impl Into<String>,
        monthly_amount: Decimal,
        counts_as_ordinary_wage: bool,
        pay_mode: PayMode,
    ) -> Self {
        Self {
            label: label.into(),
            monthly_amount,
            counts_as_ordinary_wage,
            pay_mode,
        }
    }
}

/// The sample pay slip used to pre-fill the detailed input table.
///
/// Base pay and a position allowance count towards the ordinary wage and are
/// reduced proportionally; meal and transport allowances are not ordinary
/// wage and keep being paid in full.
pub fn example_income_items() -> Vec<IncomeItem> {
    vec![
        IncomeItem::new(
            "Base pay",
            Decimal::from(2_500_000),
            true,
            PayMode::Proportional,
        ),
        IncomeItem::new(
            "Position allowance",
            Decimal::from(300_000),
            true,
            PayMode::Proportional,
        ),
        IncomeItem::new("Meal allowance", Decimal::from(200_000), false, PayMode::FullPay),
        IncomeItem::new(
            "Transport allowance",
            Decimal::from(100_000),
            false,
            PayMode::FullPay,
        ),
    ]
}

/// The wage figures, in one of the two input modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WageInput {
    /// A single ordinary wage figure, optionally with the total the company pays.
    Direct {
        /// The monthly ordinary wage.
        ordinary_wage: Decimal,
        /// The total monthly pay before the reduction, when it differs from the
        /// ordinary wage. Ignored unless positive.
        #[serde(default)]
        company_paid_override: Option<Decimal>,
    },
    /// An itemized pay slip.
    Detailed {
        /// The income items.
        items: Vec<IncomeItem>,
    },
}

/// The offset rule capping company pay plus benefit at a reference wage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OffsetRule {
    /// The monthly reference wage. When not positive, the ordinary wage base is used.
    #[serde(default)]
    pub cap_reference: Decimal,
}

/// Everything needed for one childcare benefit calculation.
///
/// The policy and proration ratio are already resolved: callers run
/// [`resolve_policy`](crate::calculation::resolve_policy) and
/// [`resolve_proration_ratio`](crate::calculation::resolve_proration_ratio)
/// first when they want those values derived from the dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// The first day of the reduction period, when known.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// The last day of the reduction period, when known.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Weekly contracted hours before the reduction.
    pub hours_before: Decimal,
    /// Weekly contracted hours after the reduction.
    pub hours_after: Decimal,
    /// The wage figures.
    pub wage: WageInput,
    /// Share of the month covered by the reduction (0-1).
    pub proration_ratio: Decimal,
    /// The policy parameters in force.
    pub policy: PolicyParameters,
    /// The offset rule, when enabled.
    #[serde(default)]
    pub offset: Option<OffsetRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_income_items_split_ordinary_and_allowances() {
        let items = example_income_items();
        assert_eq!(items.len(), 4);

        let ordinary: Decimal = items
            .iter()
            .filter(|item| item.counts_as_ordinary_wage)
            .map(|item| item.monthly_amount)
            .sum();
        let total: Decimal = items.iter().map(|item| item.monthly_amount).sum();

        assert_eq!(ordinary, Decimal::from(2_800_000));
        assert_eq!(total, Decimal::from(3_100_000));
        assert!(
            items
                .iter()
                .filter(|item| !item.counts_as_ordinary_wage)
                .all(|item| item.pay_mode == PayMode::FullPay)
        );
    }

    #[test]
    fn test_pay_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&PayMode::Proportional).unwrap(),
            "\"proportional\""
        );
        assert_eq!(
            serde_json::to_string(&PayMode::FullPay).unwrap(),
            "\"full_pay\""
        );
        let mode: PayMode = serde_json::from_str("\"no_pay\"").unwrap();
        assert_eq!(mode, PayMode::NoPay);
    }

    #[test]
    fn test_income_item_defaults_to_proportional() {
        let json = r#"{"monthly_amount": "100000", "counts_as_ordinary_wage": false}"#;
        let item: IncomeItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.pay_mode, PayMode::Proportional);
        assert_eq!(item.label, "");
    }

    #[test]
    fn test_wage_input_is_tagged_by_mode() {
        let json = r#"{"mode": "direct", "ordinary_wage": "3000000"}"#;
        let wage: WageInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            wage,
            WageInput::Direct {
                ordinary_wage: Decimal::from(3_000_000),
                company_paid_override: None,
            }
        );

        let json = r#"{"mode": "detailed", "items": []}"#;
        let wage: WageInput = serde_json::from_str(json).unwrap();
        assert_eq!(wage, WageInput::Detailed { items: vec![] });
    }
}
