//! Analytical comparison tests for Monte Carlo pricing.
//!
//! These tests verify that Monte Carlo prices converge to the
//! Black-Scholes-Merton closed form and that simulation is reproducible.
//!
//! # Test Categories
//!
//! 1. **Reproducibility**: same seed gives bit-identical paths for any thread count
//! 2. **Accuracy**: MC within a few standard errors of the closed form
//! 3. **Convergence**: standard error scales as `1/sqrt(n_paths)`
//! 4. **Discounting**: undiscounted estimate equals discounted times `e^(rT)`

use approx::assert_relative_eq;
use pricer_core::types::{OptionRight, PricingParameters};
use pricer_models::analytical::BlackScholes;
use pricer_pricing::mc::{Discounting, MonteCarloConfig, MonteCarloModel};

/// Standard test parameters: spot, strike, rate, yield, vol, maturity.
fn standard_params() -> (f64, f64, f64, f64, f64, f64) {
    (100.0, 100.0, 0.05, 0.0, 0.2, 1.0)
}

fn market(dividend_yield: f64) -> PricingParameters {
    let (spot, _strike, rate, _div, vol, maturity) = standard_params();
    PricingParameters::new(spot, maturity, rate, dividend_yield, vol).unwrap()
}

fn mc_model(
    params: PricingParameters,
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    discounting: Discounting,
) -> MonteCarloModel {
    let config = MonteCarloConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .seed(seed)
        .discounting(discounting)
        .build()
        .unwrap();
    MonteCarloModel::new(params, config).unwrap()
}

// ============================================================================
// Reproducibility Tests
// ============================================================================

#[test]
fn test_same_seed_bit_identical() {
    let a = mc_model(market(0.0), 1_000, 20, 120, Discounting::RiskNeutral);
    let b = mc_model(market(0.0), 1_000, 20, 120, Discounting::RiskNeutral);

    let pa = a.simulate_paths(1_000).unwrap();
    let pb = b.simulate_paths(1_000).unwrap();
    assert_eq!(pa.as_slice(), pb.as_slice());
    assert_eq!(a.price_call(100.0).unwrap(), b.price_call(100.0).unwrap());
}

#[test]
fn test_different_seed_differs() {
    let a = mc_model(market(0.0), 500, 5, 1, Discounting::RiskNeutral);
    let b = mc_model(market(0.0), 500, 5, 2, Discounting::RiskNeutral);
    assert_ne!(
        a.simulate_paths(500).unwrap().as_slice(),
        b.simulate_paths(500).unwrap().as_slice()
    );
}

#[test]
fn test_thread_count_does_not_change_paths() {
    let model = mc_model(market(0.02), 2_000, 16, 120, Discounting::RiskNeutral);
    let default_pool = model.simulate_paths(2_000).unwrap();

    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let single_thread = single.install(|| model.simulate_paths(2_000).unwrap());

    assert_eq!(default_pool, single_thread);
}

#[test]
fn test_paths_start_at_spot() {
    let model = mc_model(market(0.0), 100, 12, 120, Discounting::RiskNeutral);
    let paths = model.simulate_paths(100).unwrap();

    assert_eq!(paths.n_paths(), 100);
    for path in paths.iter() {
        assert_eq!(path.len(), 13);
        assert_eq!(path[0], 100.0);
    }
    assert_relative_eq!(*paths.times().last().unwrap(), 1.0, epsilon = 1e-12);
}

// ============================================================================
// Accuracy Tests
// ============================================================================

#[test]
fn test_mc_call_put_vs_black_scholes() {
    let (_spot, strike, ..) = standard_params();
    for dividend_yield in [0.0, 0.03] {
        let params = market(dividend_yield);
        let bs = BlackScholes::new(params, strike).unwrap();
        let model = mc_model(params, 50_000, 10, 120, Discounting::RiskNeutral);

        for right in OptionRight::ALL {
            let estimate = model.estimate(strike, right).unwrap();
            let analytical = bs.price(right);
            let tolerance = (4.0 * estimate.std_error).max(0.02);
            assert!(
                (estimate.price - analytical).abs() < tolerance,
                "{} with c={}: MC {} vs BS {} (tol {})",
                right,
                dividend_yield,
                estimate.price,
                analytical,
                tolerance
            );
        }
    }
}

#[test]
fn test_mc_parity_within_sampling_error() {
    let params = market(0.01);
    let model = mc_model(params, 40_000, 4, 7, Discounting::RiskNeutral);
    let (call, put) = model.estimate_pair(95.0).unwrap();

    let residual = (call.price - put.price - params.forward_intrinsic(95.0)).abs();
    assert!(residual < 4.0 * (call.std_error + put.std_error));
}

// ============================================================================
// Convergence Tests
// ============================================================================

#[test]
fn test_std_error_halves_with_four_times_paths() {
    let small = mc_model(market(0.0), 10_000, 1, 120, Discounting::RiskNeutral)
        .estimate(100.0, OptionRight::Call)
        .unwrap();
    let large = mc_model(market(0.0), 40_000, 1, 120, Discounting::RiskNeutral)
        .estimate(100.0, OptionRight::Call)
        .unwrap();

    let ratio = large.std_error / small.std_error;
    assert!(
        (0.4..0.6).contains(&ratio),
        "std error ratio {} not close to 0.5",
        ratio
    );
}

// ============================================================================
// Discounting Tests
// ============================================================================

#[test]
fn test_undiscounted_equals_discounted_times_growth() {
    let params = market(0.02);
    let discounted = mc_model(params, 5_000, 8, 120, Discounting::RiskNeutral);
    let raw = mc_model(params, 5_000, 8, 120, Discounting::Undiscounted);

    let growth = (params.rate() * params.maturity()).exp();
    for right in OptionRight::ALL {
        let d = discounted.estimate(100.0, right).unwrap();
        let u = raw.estimate(100.0, right).unwrap();
        assert_relative_eq!(u.price, d.price * growth, max_relative = 1e-12);
    }
}
