//! Cox-Ross-Rubinstein step parameters.

use pricer_core::types::params::{require_count, require_finite, require_positive};
use pricer_core::types::{PricingError, PricingParameters};

/// Maximum number of lattice periods.
///
/// A lattice stores `(n+1)(n+2)/2` nodes, about 12.5 million at the cap.
pub const MAX_PERIODS: usize = 5_000;

/// Per-step quantities of a recombining binomial lattice.
///
/// With `Δt = T/n`:
/// - `u = e^(σ√Δt)`, `d = 1/u`
/// - `q = (e^((r-c)Δt) - d) / (u - d)`
///
/// `q` is checked to lie in `[0, 1]`. Outside that range the lattice admits
/// arbitrage and the backward induction is meaningless, so construction fails.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatticeParameters {
    spot: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    n_periods: usize,
    delta_t: f64,
    up: f64,
    down: f64,
    q: f64,
}

impl LatticeParameters {
    /// CRR parameters for `n_periods` steps, `u = e^(σ√Δt)`.
    ///
    /// # Errors
    /// - `InvalidParameter("n_periods")` if `n_periods` is 0 or above [`MAX_PERIODS`]
    /// - `InvalidParameter("q")` if the risk-neutral probability leaves `[0, 1]`
    pub fn new(params: &PricingParameters, n_periods: usize) -> Result<Self, PricingError> {
        require_count("n_periods", n_periods)?;
        let delta_t = params.maturity() / n_periods as f64;
        let up = (params.volatility() * delta_t.sqrt()).exp();
        Self::from_factors(
            params.spot(),
            params.maturity(),
            params.rate(),
            params.dividend_yield(),
            n_periods,
            up,
        )
    }

    /// Parameters for an explicitly supplied up factor (`d = 1/u`).
    ///
    /// Used to reproduce published lattices where `u` is quoted directly.
    ///
    /// # Errors
    /// `InvalidParameter` for non-positive spot/maturity, `up <= 1`, a period
    /// count outside `[1, MAX_PERIODS]`, or `q` outside `[0, 1]`.
    pub fn with_up_factor(
        spot: f64,
        maturity: f64,
        rate: f64,
        dividend_yield: f64,
        n_periods: usize,
        up: f64,
    ) -> Result<Self, PricingError> {
        require_positive("spot", spot)?;
        require_positive("maturity", maturity)?;
        require_finite("rate", rate)?;
        require_finite("dividend_yield", dividend_yield)?;
        require_count("n_periods", n_periods)?;
        Self::from_factors(spot, maturity, rate, dividend_yield, n_periods, up)
    }

    fn from_factors(
        spot: f64,
        maturity: f64,
        rate: f64,
        dividend_yield: f64,
        n_periods: usize,
        up: f64,
    ) -> Result<Self, PricingError> {
        if n_periods > MAX_PERIODS {
            return Err(PricingError::invalid_parameter(
                "n_periods",
                format!("must be in range [1, {}], got {}", MAX_PERIODS, n_periods),
            ));
        }
        if !(up.is_finite() && up > 1.0) {
            return Err(PricingError::invalid_parameter(
                "up",
                format!("up factor must be finite and greater than 1, got {}", up),
            ));
        }

        let delta_t = maturity / n_periods as f64;
        let down = 1.0 / up;
        let growth = ((rate - dividend_yield) * delta_t).exp();
        let q = (growth - down) / (up - down);

        if !(0.0..=1.0).contains(&q) {
            return Err(PricingError::invalid_parameter(
                "q",
                format!(
                    "risk-neutral probability {:.6} outside [0, 1]; increase n_periods or volatility",
                    q
                ),
            ));
        }

        Ok(Self {
            spot,
            maturity,
            rate,
            dividend_yield,
            n_periods,
            delta_t,
            up,
            down,
            q,
        })
    }

    /// Spot price at the root node.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Number of time steps.
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Step length `T/n`.
    #[inline]
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Up factor.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down factor, `1/u`.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Risk-neutral up probability.
    #[inline]
    pub fn q(&self) -> f64 {
        self.q
    }

    /// One-step discount factor, `e^(-rΔt)`.
    #[inline]
    pub fn step_discount(&self) -> f64 {
        (-self.rate * self.delta_t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_crr_factors() {
        let params = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        let lp = LatticeParameters::new(&params, 4).unwrap();

        assert_relative_eq!(lp.delta_t(), 0.25, epsilon = 1e-15);
        assert_relative_eq!(lp.up(), 0.1_f64.exp(), epsilon = 1e-15);
        assert_relative_eq!(lp.up() * lp.down(), 1.0, epsilon = 1e-15);

        let expected_q = ((0.05 * 0.25_f64).exp() - lp.down()) / (lp.up() - lp.down());
        assert_relative_eq!(lp.q(), expected_q, epsilon = 1e-15);
        assert_relative_eq!(lp.up().ln() / lp.delta_t().sqrt(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_yield_lowers_q() {
        let no_yield = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        let with_yield = PricingParameters::new(100.0, 1.0, 0.05, 0.03, 0.2).unwrap();
        let q0 = LatticeParameters::new(&no_yield, 50).unwrap().q();
        let q1 = LatticeParameters::new(&with_yield, 50).unwrap().q();
        assert!(q1 < q0);
    }

    #[test]
    fn test_zero_periods_rejected() {
        let params = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        match LatticeParameters::new(&params, 0) {
            Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "n_periods"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_period_cap() {
        let params = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        assert!(LatticeParameters::new(&params, MAX_PERIODS).is_ok());

        for n_periods in [MAX_PERIODS + 1, usize::MAX] {
            match LatticeParameters::new(&params, n_periods) {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "n_periods"),
                other => panic!("Expected InvalidParameter(n_periods), got {:?}", other),
            }
        }

        let err = LatticeParameters::with_up_factor(100.0, 0.25, 0.1194, 0.0, usize::MAX, 1.03775)
            .unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        // Low volatility with a large rate and one coarse step: e^(rΔt) > u
        let params = PricingParameters::new(100.0, 1.0, 0.5, 0.0, 0.01).unwrap();
        match LatticeParameters::new(&params, 1) {
            Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "q"),
            other => panic!("Expected InvalidParameter(q), got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_up_factor() {
        let lp = LatticeParameters::with_up_factor(100.0, 0.25, 0.1194, 0.0, 10, 1.03775).unwrap();
        assert_relative_eq!(lp.down(), 1.0 / 1.03775, epsilon = 1e-15);
        assert_relative_eq!(lp.delta_t(), 0.025, epsilon = 1e-15);
        assert!(lp.q() > 0.0 && lp.q() < 1.0);
    }

    #[test]
    fn test_explicit_up_factor_validation() {
        assert!(LatticeParameters::with_up_factor(100.0, 1.0, 0.05, 0.0, 10, 1.0).is_err());
        assert!(LatticeParameters::with_up_factor(100.0, 1.0, 0.05, 0.0, 10, 0.9).is_err());
        assert!(LatticeParameters::with_up_factor(-1.0, 1.0, 0.05, 0.0, 10, 1.1).is_err());
        assert!(LatticeParameters::with_up_factor(100.0, 0.0, 0.05, 0.0, 10, 1.1).is_err());
        assert!(LatticeParameters::with_up_factor(100.0, 1.0, 0.05, 0.0, 0, 1.1).is_err());
    }
}
