//! # Random Number Generation
//!
//! Seeded pseudo-random numbers for Monte Carlo simulation.
//!
//! - **Reproducibility**: every generator is created from an explicit seed
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//!
//! Draws are always taken sequentially from one generator; parallelism in
//! the engines is applied only after the draws for a step are fixed.

mod prng;

pub use prng::PricerRng;
