//! Configuration types for benefit calculation.
//!
//! This module contains the strongly-typed configuration structures that are
//! either built in or deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::format::parse_date;
use crate::models::PolicyParameters;

/// Policy parameters together with the date they take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// The first date these parameters apply to.
    pub effective_from: NaiveDate,
    /// The parameters.
    pub parameters: PolicyParameters,
}

/// The file layout of `childcare_policies.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyTableFile {
    /// The policy entries, in any order.
    pub policies: Vec<PolicyEntry>,
}

/// The ordered table of childcare policy parameters.
///
/// Exactly one entry applies to any calendar date: the latest entry whose
/// `effective_from` is on or before that date. The earliest entry also covers
/// every date before its own `effective_from`.
///
/// # Example
///
/// ```
/// use benefit_engine::config::PolicyTable;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let table = PolicyTable::builtin();
/// let policy = table.policy_for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
/// assert_eq!(policy.cap_tier_a, Decimal::from(2_200_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyTable {
    /// Sorted oldest first, never empty.
    entries: Vec<PolicyEntry>,
}

const fn won(amount: u32) -> Decimal {
    Decimal::from_parts(amount, 0, 0, false, 0)
}

const BUILTIN_RATIO_TIER_B: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Tier A threshold, tier A cap and tier B cap before the first change.
const BUILTIN_INITIAL_POLICY: (u32, u32, u32) = (5, 2_000_000, 1_500_000);

/// Dated changes to the built-in policy, oldest first.
const BUILTIN_POLICY_CHANGES: [((i32, u32, u32), (u32, u32, u32)); 3] = [
    ((2024, 7, 1), (10, 2_000_000, 1_500_000)),
    ((2025, 1, 1), (10, 2_200_000, 1_500_000)),
    ((2026, 1, 1), (10, 2_500_000, 1_600_000)),
];

impl PolicyTable {
    /// Creates a policy table, sorting the entries by effective date.
    ///
    /// Returns `InvalidConfig` if `entries` is empty or two entries share an
    /// effective date.
    pub fn new(entries: Vec<PolicyEntry>) -> EngineResult<Self> {
        let mut entries = entries;
        entries.sort_by(|a, b| a.effective_from.cmp(&b.effective_from));

        if entries.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "policy table has no entries".to_string(),
            });
        }

        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].effective_from == pair[1].effective_from)
        {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "policy table has two entries effective from {}",
                    pair[0].effective_from
                ),
            });
        }

        Ok(Self { entries })
    }

    /// Returns the statutory policy table.
    ///
    /// | effective from | threshold | cap A     | cap B     | floor   |
    /// |----------------|-----------|-----------|-----------|---------|
    /// | (earlier)      | 5         | 2,000,000 | 1,500,000 | 500,000 |
    /// | 2024-07-01     | 10        | 2,000,000 | 1,500,000 | 500,000 |
    /// | 2025-01-01     | 10        | 2,200,000 | 1,500,000 | 500,000 |
    /// | 2026-01-01     | 10        | 2,500,000 | 1,600,000 | 500,000 |
    ///
    /// Tier B uses 80% of the ordinary wage throughout.
    pub fn builtin() -> Self {
        let entry = |effective_from: NaiveDate, (threshold, cap_a, cap_b): (u32, u32, u32)| {
            PolicyEntry {
                effective_from,
                parameters: PolicyParameters {
                    hours_threshold_tier_a: Decimal::from(threshold),
                    cap_tier_a: won(cap_a),
                    cap_tier_b: won(cap_b),
                    ratio_tier_b: BUILTIN_RATIO_TIER_B,
                    floor_monthly: won(500_000),
                },
            }
        };

        let dated = BUILTIN_POLICY_CHANGES
            .iter()
            .filter_map(|&((year, month, day), values)| {
                NaiveDate::from_ymd_opt(year, month, day).map(|date| entry(date, values))
            });

        Self {
            entries: std::iter::once(entry(NaiveDate::MIN, BUILTIN_INITIAL_POLICY))
                .chain(dated)
                .collect(),
        }
    }

    /// Returns all entries, oldest first.
    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    /// Returns the entry in force on `date`.
    pub fn entry_for_date(&self, date: NaiveDate) -> &PolicyEntry {
        self.entries
            .iter()
            .rfind(|entry| entry.effective_from <= date)
            .unwrap_or(&self.entries[0])
    }

    /// Returns the policy parameters in force on `date`.
    pub fn policy_for_date(&self, date: NaiveDate) -> PolicyParameters {
        self.entry_for_date(date).parameters
    }

    /// Returns the policy parameters in force on a `YYYY-MM-DD` date, or
    /// `None` when the text is not a valid date.
    pub fn resolve_policy(&self, date: &str) -> Option<PolicyParameters> {
        parse_date(date).map(|date| self.policy_for_date(date))
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// One row of the benefit duration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBand {
    /// The shortest insured period (in years) this row applies to.
    pub min_insured_years: Decimal,
    /// Benefit days for claimants under the priority age.
    pub days_standard: u32,
    /// Benefit days for claimants at or over the priority age, or disabled.
    pub days_priority: u32,
}

/// Constants for the unemployment (job-seeking) benefit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnemploymentConfig {
    /// The highest daily benefit.
    pub daily_upper_limit: Decimal,
    /// The lowest daily benefit (based on an 8-hour contracted day).
    pub daily_lower_limit: Decimal,
    /// Share of the average daily wage paid as benefit.
    pub replacement_rate: Decimal,
    /// Days used to turn a monthly wage into a daily wage.
    pub days_per_month: Decimal,
    /// Age from which the longer duration column applies.
    pub priority_age: u32,
    /// Duration rows, sorted by `min_insured_years`.
    pub duration_table: Vec<DurationBand>,
}

impl UnemploymentConfig {
    /// Returns the 2025 statutory constants.
    pub fn builtin() -> Self {
        let band = |years: u32, days_standard: u32, days_priority: u32| DurationBand {
            min_insured_years: Decimal::from(years),
            days_standard,
            days_priority,
        };

        Self {
            daily_upper_limit: won(66_000),
            daily_lower_limit: won(63_104),
            replacement_rate: Decimal::from_parts(6, 0, 0, false, 1),
            days_per_month: won(30),
            priority_age: 50,
            duration_table: vec![
                band(0, 120, 120),
                band(1, 150, 180),
                band(3, 180, 210),
                band(5, 210, 240),
                band(10, 240, 270),
            ],
        }
    }

    pub(crate) fn validate(mut self) -> EngineResult<Self> {
        self.duration_table
            .sort_by(|a, b| a.min_insured_years.cmp(&b.min_insured_years));
        if self.duration_table.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "unemployment duration table has no rows".to_string(),
            });
        }
        if self.days_per_month <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: "days_per_month must be positive".to_string(),
            });
        }
        if self.daily_lower_limit > self.daily_upper_limit {
            return Err(EngineError::InvalidConfig {
                message: "daily_lower_limit exceeds daily_upper_limit".to_string(),
            });
        }
        Ok(self)
    }
}

impl Default for UnemploymentConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

/// One income band of the government matching contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTier {
    /// Highest annual income (in units of 10,000 won) in this band.
    pub income_limit: Decimal,
    /// The part of the monthly deposit that is matched.
    pub match_limit: Decimal,
    /// The matching rate.
    pub match_ratio: Decimal,
}

/// Constants for the youth savings account projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouthLeapConfig {
    /// Annual income (in units of 10,000 won) above which the account is unavailable.
    pub income_cap: Decimal,
    /// Matching bands, sorted by `income_limit`.
    pub contribution_tiers: Vec<ContributionTier>,
    /// Length of the savings term in months.
    pub term_months: u32,
    /// Tax withheld from interest when the account is not tax free.
    pub interest_tax_rate: Decimal,
}

impl YouthLeapConfig {
    /// Returns the 2025/2026 matching table.
    pub fn builtin() -> Self {
        let tier = |income_limit: u32, match_limit: u32, ratio_per_mille: u32| ContributionTier {
            income_limit: Decimal::from(income_limit),
            match_limit: won(match_limit),
            match_ratio: Decimal::from_parts(ratio_per_mille, 0, 0, false, 3),
        };

        Self {
            income_cap: won(7_500),
            contribution_tiers: vec![
                tier(2_400, 400_000, 60),
                tier(3_600, 500_000, 46),
                tier(4_800, 600_000, 37),
                tier(6_000, 700_000, 30),
                tier(7_500, 0, 0),
            ],
            term_months: 60,
            interest_tax_rate: Decimal::from_parts(154, 0, 0, false, 3),
        }
    }

    pub(crate) fn validate(mut self) -> EngineResult<Self> {
        self.contribution_tiers
            .sort_by(|a, b| a.income_limit.cmp(&b.income_limit));
        if self.term_months == 0 {
            return Err(EngineError::InvalidConfig {
                message: "term_months must be positive".to_string(),
            });
        }
        Ok(self)
    }
}

impl Default for YouthLeapConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The complete configuration for every calculator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BenefitConfig {
    /// Childcare policy parameters by effective date.
    pub policies: PolicyTable,
    /// Unemployment benefit constants.
    pub unemployment: UnemploymentConfig,
    /// Youth savings account constants.
    pub youth_leap: YouthLeapConfig,
}
