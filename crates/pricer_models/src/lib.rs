//! # Pricer Models (L2: Business Logic)
//!
//! Deterministic option pricing models.
//!
//! This crate provides:
//! - Black-Scholes-Merton closed form with a continuous dividend yield
//! - Analytical Greeks for diagnostics
//! - Cox-Ross-Rubinstein binomial lattice for European and American exercise
//!
//! ## Design Principles
//!
//! - **Validated inputs**: models are built from `pricer_core::types::PricingParameters`
//! - **Closed enums** for option right and exercise style; only text parsing fails
//! - **Arena storage** for lattices: one allocation per lattice

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod lattice;
