//! # pricer_core: Foundation Layer for the Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error taxonomy: `PricingError`, `DateError` (`types::error`)
//! - Option enumerations: `OptionRight`, `ExerciseStyle` (`types::option`)
//! - The validated `PricingParameters` bundle (`types::params`)
//! - Maturity computation from expiry dates (`types::time`)
//! - Standard normal distribution functions (`math::distributions`)
//! - Historical volatility estimation (`math::statistics`)
//!
//! Layer 1 has no dependencies on other pricer_* crates.
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::norm_cdf;
//! use pricer_core::types::{ExerciseStyle, PricingParameters};
//!
//! let params = PricingParameters::new(100.0, 0.25, 0.05, 0.0, 0.2).unwrap();
//! assert_eq!(params.maturity(), 0.25);
//!
//! let style: ExerciseStyle = "american".parse().unwrap();
//! assert!(style.allows_early_exercise());
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for parameter and enum types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
