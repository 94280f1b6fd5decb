//! Closed-form pricing for European options.
//!
//! - [`BlackScholes`]: Black-Scholes-Merton with a continuous dividend yield
//! - [`Greeks`]: analytical sensitivities
//!
//! The normal CDF/PDF live in `pricer_core::math` and are shared with the
//! volatility tooling.

pub mod black_scholes;

pub use black_scholes::{BlackScholes, Greeks};
