//! # Monte Carlo Engine
//!
//! European option pricing by simulating Geometric Brownian Motion.
//!
//! - [`config`]: simulation sizes, seed and discounting convention
//! - [`paths`]: exact lognormal path generation with rayon-parallel updates
//! - [`model`]: payoff averaging and standard errors
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{OptionRight, PricingParameters};
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloModel};
//!
//! let params = PricingParameters::new(100.0, 0.5, 0.03, 0.0, 0.25).unwrap();
//! let config = MonteCarloConfig::builder().n_paths(5_000).n_steps(20).build().unwrap();
//! let model = MonteCarloModel::new(params, config).unwrap();
//!
//! let estimate = model.estimate(100.0, OptionRight::Put).unwrap();
//! assert!(estimate.std_error > 0.0);
//! ```

pub mod config;
pub mod model;
pub mod paths;

pub use config::{
    Discounting, MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_PATHS, DEFAULT_SEED,
    DEFAULT_STEPS, MAX_PATHS, MAX_PATH_POINTS, MAX_STEPS,
};
pub use model::{MonteCarloEstimate, MonteCarloModel};
pub use paths::{generate_gbm_paths, GbmStep, SimulatedPaths};
