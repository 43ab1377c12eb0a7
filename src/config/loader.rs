//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading benefit
//! configurations from YAML files, or from the built-in statutory constants.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{BenefitConfig, PolicyTable, PolicyTableFile, UnemploymentConfig, YouthLeapConfig};

/// Loads and provides access to benefit configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/benefits/
/// ├── childcare_policies.yaml # Childcare policy parameters by effective date
/// ├── unemployment.yaml       # Daily limits and benefit duration table
/// └── youth_leap.yaml         # Matching contribution bands and term
/// ```
///
/// # Example
///
/// ```no_run
/// use benefit_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/benefits").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let policy = loader.policies().policy_for_date(date);
/// println!("Tier A cap: {}", policy.cap_tier_a);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: BenefitConfig,
}

impl ConfigLoader {
    /// Returns a loader holding the built-in statutory constants.
    pub fn builtin() -> Self {
        Self {
            config: BenefitConfig::default(),
        }
    }

    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/benefits")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A table is empty or otherwise structurally invalid
    ///
    /// # Example
    ///
    /// ```no_run
    /// use benefit_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/benefits")?;
    /// # Ok::<(), benefit_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_file =
            Self::load_yaml::<PolicyTableFile>(&path.join("childcare_policies.yaml"))?;
        let policies = PolicyTable::new(policy_file.policies)?;

        let unemployment =
            Self::load_yaml::<UnemploymentConfig>(&path.join("unemployment.yaml"))?.validate()?;

        let youth_leap =
            Self::load_yaml::<YouthLeapConfig>(&path.join("youth_leap.yaml"))?.validate()?;

        debug!(
            path = %path.display(),
            policy_entries = policies.entries().len(),
            duration_bands = unemployment.duration_table.len(),
            contribution_tiers = youth_leap.contribution_tiers.len(),
            "Loaded benefit configuration"
        );

        Ok(Self {
            config: BenefitConfig {
                policies,
                unemployment,
                youth_leap,
            },
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &BenefitConfig {
        &self.config
    }

    /// Returns the childcare policy table.
    pub fn policies(&self) -> &PolicyTable {
        &self.config.policies
    }

    /// Returns the unemployment benefit constants.
    pub fn unemployment(&self) -> &UnemploymentConfig {
        &self.config.unemployment
    }

    /// Returns the youth savings account constants.
    pub fn youth_leap(&self) -> &YouthLeapConfig {
        &self.config.youth_leap
    }
}
