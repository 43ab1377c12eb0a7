//! Configuration loading and management for the Benefit Engine.
//!
//! This module provides the childcare policy table and the statutory
//! constants of the other calculators. Every table has a built-in default and
//! can be replaced by loading a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use benefit_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/benefits").unwrap();
//! println!("Policy entries: {}", config.policies().entries().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BenefitConfig, ContributionTier, DurationBand, PolicyEntry, PolicyTable, PolicyTableFile,
    UnemploymentConfig, YouthLeapConfig,
};
