//! Path generation for Monte Carlo simulation.
//!
//! Geometric Brownian Motion under the risk-neutral measure,
//! `dS = (r - c) S dt + σ S dW`, is advanced with its exact lognormal step:
//!
//! ```text
//! S(t+Δt) = S(t) · exp((r - c - σ²/2)·Δt + σ·√Δt·Z)
//! ```
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `paths[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.
//!
//! # Determinism
//!
//! For each step the `n_paths` normals are drawn sequentially in path order,
//! then every path is advanced in parallel. The draws never depend on the
//! thread schedule, so results are bit-identical for any rayon pool size.

use pricer_core::types::PricingParameters;
use rayon::prelude::*;

use crate::rng::PricerRng;

/// Per-step GBM coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStep {
    /// Log drift per step, `(r - c - σ²/2)·Δt`.
    pub drift: f64,
    /// Log diffusion per step, `σ·√Δt`.
    pub diffusion: f64,
    /// Step length in years.
    pub dt: f64,
}

impl GbmStep {
    /// Coefficients for `n_steps` equal steps to maturity.
    pub fn new(params: &PricingParameters, n_steps: usize) -> Self {
        let dt = params.maturity() / n_steps as f64;
        let sigma = params.volatility();
        Self {
            drift: (params.rate() - params.dividend_yield() - 0.5 * sigma * sigma) * dt,
            diffusion: sigma * dt.sqrt(),
            dt,
        }
    }

    /// Advances one price by one step with normal draw `z`.
    #[inline]
    pub fn advance(&self, price: f64, z: f64) -> f64 {
        price * (self.drift + self.diffusion * z).exp()
    }
}

/// A block of simulated price paths.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedPaths {
    n_paths: usize,
    n_steps: usize,
    dt: f64,
    values: Vec<f64>,
}

impl SimulatedPaths {
    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per path (each path has `n_steps + 1` points).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Step length in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Prices along path `i`, starting at the spot.
    ///
    /// # Panics
    /// If `i >= n_paths`.
    #[inline]
    pub fn path(&self, i: usize) -> &[f64] {
        let stride = self.n_steps + 1;
        &self.values[i * stride..(i + 1) * stride]
    }

    /// Iterates over all paths in order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.n_steps + 1)
    }

    /// Terminal price of every path.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.iter().map(|path| path[self.n_steps]).collect()
    }

    /// Observation times `0, Δt, ..., T`.
    pub fn times(&self) -> Vec<f64> {
        (0..=self.n_steps).map(|t| t as f64 * self.dt).collect()
    }

    /// Raw row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Generates `n_paths` GBM paths of `n_steps` steps from `rng`.
///
/// Callers validate the counts.
pub fn generate_gbm_paths(
    params: &PricingParameters,
    n_steps: usize,
    n_paths: usize,
    rng: &mut PricerRng,
) -> SimulatedPaths {
    let stride = n_steps + 1;
    let step = GbmStep::new(params, n_steps);
    let spot = params.spot();

    let mut values = vec![0.0; n_paths * stride];
    values
        .par_chunks_mut(stride)
        .for_each(|path| path[0] = spot);

    let mut normals = vec![0.0; n_paths];
    for t in 1..=n_steps {
        rng.fill_normal(&mut normals);
        values
            .par_chunks_mut(stride)
            .zip(normals.par_iter())
            .for_each(|(path, &z)| path[t] = step.advance(path[t - 1], z));
    }

    SimulatedPaths {
        n_paths,
        n_steps,
        dt: step.dt,
        values,
    }
}
