//! Recombining binomial lattice pricing.
//!
//! - `params`: CRR step factors and risk-neutral probability
//! - `tree`: arena-backed triangular node storage
//! - `binomial`: forward price lattice and backward induction

pub mod binomial;
pub mod params;
pub mod tree;

pub use binomial::BinomialModel;
pub use params::{LatticeParameters, MAX_PERIODS};
pub use tree::{PayoffLattice, PriceLattice, TriangularLattice};
