//! Monte Carlo pricing of European options under GBM.
//!
//! Every pricing call reseeds a fresh [`PricerRng`] from the configured
//! seed, so `price_call` and `price_put` see the same path set and repeated
//! calls return identical numbers.

use pricer_core::math::statistics::sample_std_dev;
use pricer_core::types::params::require_positive;
use pricer_core::types::{OptionRight, PricingError, PricingParameters};
use rayon::prelude::*;
use tracing::debug;

use super::config::{validate_grid, Discounting, MonteCarloConfig};
use super::paths::{generate_gbm_paths, SimulatedPaths};
use crate::rng::PricerRng;

/// Price estimate with its sampling error.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloEstimate {
    /// Estimated price.
    pub price: f64,
    /// Standard error of the estimate (NaN with a single path).
    pub std_error: f64,
    /// Number of paths averaged.
    pub n_paths: usize,
    /// Discounting convention applied.
    pub discounting: Discounting,
}

impl MonteCarloEstimate {
    /// 95% confidence interval half-width (1.96 × standard error).
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// 95% confidence interval.
    pub fn interval_95(&self) -> (f64, f64) {
        let half_width = self.confidence_95();
        (self.price - half_width, self.price + half_width)
    }
}

/// Monte Carlo model for European options.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::PricingParameters;
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloModel};
///
/// let params = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .n_steps(1)
///     .build()
///     .unwrap();
/// let model = MonteCarloModel::new(params, config).unwrap();
///
/// let call = model.price_call(100.0).unwrap();
/// assert!((call - 10.45).abs() < 0.5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloModel {
    params: PricingParameters,
    config: MonteCarloConfig,
}

impl MonteCarloModel {
    /// Creates a model.
    ///
    /// # Errors
    /// `InvalidParameter` if the configuration does not validate.
    pub fn new(params: PricingParameters, config: MonteCarloConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { params, config })
    }

    /// Market parameters.
    #[inline]
    pub fn params(&self) -> &PricingParameters {
        &self.params
    }

    /// Simulation configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Simulates `n_paths` paths from a freshly seeded generator.
    ///
    /// The first `k` paths do not depend on `n_paths` only when
    /// `n_steps == 1`; draws are step-major.
    ///
    /// # Errors
    /// `InvalidParameter("n_paths")` if `n_paths` is 0, above the cap, or
    /// the path set would exceed [`MAX_PATH_POINTS`](super::MAX_PATH_POINTS).
    pub fn simulate_paths(&self, n_paths: usize) -> Result<SimulatedPaths, PricingError> {
        validate_grid(n_paths, self.config.n_steps())?;
        let mut rng = PricerRng::from_seed(self.config.seed());
        debug!(
            n_paths,
            n_steps = self.config.n_steps(),
            seed = rng.seed(),
            "simulating GBM paths"
        );
        Ok(generate_gbm_paths(
            &self.params,
            self.config.n_steps(),
            n_paths,
            &mut rng,
        ))
    }

    /// Call price with the configured path count and discounting.
    pub fn price_call(&self, strike: f64) -> Result<f64, PricingError> {
        self.estimate(strike, OptionRight::Call).map(|e| e.price)
    }

    /// Put price with the configured path count and discounting.
    pub fn price_put(&self, strike: f64) -> Result<f64, PricingError> {
        self.estimate(strike, OptionRight::Put).map(|e| e.price)
    }

    /// Estimate with standard error for one right.
    ///
    /// # Errors
    /// `InvalidParameter("strike")` if the strike is not positive and finite.
    pub fn estimate(
        &self,
        strike: f64,
        right: OptionRight,
    ) -> Result<MonteCarloEstimate, PricingError> {
        require_positive("strike", strike)?;
        let paths = self.simulate_paths(self.config.n_paths())?;
        Ok(self.estimate_from_paths(&paths, strike, right))
    }

    /// Call and put estimates from one shared path set.
    ///
    /// Equal to calling [`estimate`](Self::estimate) twice, at half the cost.
    pub fn estimate_pair(
        &self,
        strike: f64,
    ) -> Result<(MonteCarloEstimate, MonteCarloEstimate), PricingError> {
        require_positive("strike", strike)?;
        let paths = self.simulate_paths(self.config.n_paths())?;
        Ok((
            self.estimate_from_paths(&paths, strike, OptionRight::Call),
            self.estimate_from_paths(&paths, strike, OptionRight::Put),
        ))
    }

    /// Averages terminal payoffs of an existing path set.
    pub fn estimate_from_paths(
        &self,
        paths: &SimulatedPaths,
        strike: f64,
        right: OptionRight,
    ) -> MonteCarloEstimate {
        let n_steps = paths.n_steps();
        let payoffs: Vec<f64> = paths
            .as_slice()
            .par_chunks_exact(n_steps + 1)
            .map(|path| right.intrinsic(path[n_steps], strike))
            .collect();

        let n = payoffs.len() as f64;
        let mean = payoffs.iter().sum::<f64>() / n;
        let discounting = self.config.discounting();
        let factor = discounting.factor(self.params.rate(), self.params.maturity());
        let std_error = sample_std_dev(&payoffs)
            .map(|sd| factor * sd / n.sqrt())
            .unwrap_or(f64::NAN);

        debug!(
            %right,
            strike,
            mean_payoff = mean,
            %discounting,
            "Monte Carlo payoff average"
        );

        MonteCarloEstimate {
            price: factor * mean,
            std_error,
            n_paths: payoffs.len(),
            discounting,
        }
    }
}
