//! Core option, parameter, time and error types.
//!
//! This module provides:
//! - `option`: [`OptionRight`] and [`ExerciseStyle`] enumerations
//! - `params`: the validated [`PricingParameters`] bundle
//! - `time`: maturity computation from expiry dates (Act/365)
//! - `error`: structured error types for pricing and date handling

pub mod error;
pub mod option;
pub mod params;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use option::{ExerciseStyle, OptionRight};
pub use params::PricingParameters;
pub use time::{maturity_from_dates, maturity_from_today, parse_iso_date, Maturity};
