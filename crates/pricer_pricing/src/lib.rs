//! # Pricer Pricing (Layer 3: Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing hosts the stochastic engine and the model dispatch:
//! - Seeded random number generation ([`rng`])
//! - Monte Carlo GBM pricing with standard errors ([`mc`])
//! - Tagged selection between the closed form, the lattice and Monte Carlo
//!   ([`request`])
//!
//! ## Reproducibility
//!
//! Every Monte Carlo call reseeds its generator from the configured seed.
//! Normals are drawn sequentially; only the per-path updates run on the rayon
//! pool, so results do not depend on the number of threads.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::PricingParameters;
//! use pricer_pricing::request::{ModelSelection, PricingRequest};
//!
//! let params = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
//! let model: ModelSelection = "binomial".parse().unwrap();
//! let outcome = PricingRequest::new(params, 100.0, model).price().unwrap();
//!
//! assert!((outcome.call - 10.45).abs() < 0.05);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod request;
pub mod rng;
