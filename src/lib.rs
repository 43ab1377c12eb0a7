//! Benefit Engine for Korean employment and savings benefits
//!
//! This crate calculates the childcare reduced-working-hours benefit (with
//! policy lookup by date, monthly proration, a floor and an optional offset
//! against company pay), and provides smaller calculators for the housing
//! subscription score, the unemployment benefit and the youth savings account.
//! Every calculation returns an audit trace explaining how it got its figures.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
