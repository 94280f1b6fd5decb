//! Cox-Ross-Rubinstein binomial model for European and American options.
//!
//! ## Algorithm
//!
//! 1. Build the recombining price lattice forward from the root:
//!    the top node of each step is the previous top times `u`, every other
//!    node is its predecessor at the same index times `d`.
//! 2. Seed the terminal level with the payoff `max(±(S - K), 0)`.
//! 3. Step backwards from `n - 1` to `0`:
//!    `V(t, j) = e^(-rΔt)·(q·V(t+1, j+1) + (1-q)·V(t+1, j))`,
//!    taking `max(V, intrinsic)` at American nodes.
//!
//! Time and space are O(n²) and O((n+1)(n+2)/2).

use pricer_core::types::params::require_positive;
use pricer_core::types::{ExerciseStyle, OptionRight, PricingError, PricingParameters};

use super::params::LatticeParameters;
use super::tree::{PayoffLattice, PriceLattice, TriangularLattice};

/// Binomial lattice pricer.
///
/// # Examples
/// ```
/// use pricer_core::types::{ExerciseStyle, OptionRight, PricingParameters};
/// use pricer_models::lattice::BinomialModel;
///
/// let params = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let model = BinomialModel::from_parameters(&params, 200).unwrap();
///
/// let european = model.price(100.0, ExerciseStyle::European, OptionRight::Put).unwrap();
/// let american = model.price(100.0, ExerciseStyle::American, OptionRight::Put).unwrap();
/// assert!(american > european);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinomialModel {
    params: LatticeParameters,
}

impl BinomialModel {
    /// Creates a model from validated lattice parameters.
    pub fn new(params: LatticeParameters) -> Self {
        Self { params }
    }

    /// Shorthand for `BinomialModel::new(LatticeParameters::new(params, n_periods)?)`.
    pub fn from_parameters(
        params: &PricingParameters,
        n_periods: usize,
    ) -> Result<Self, PricingError> {
        LatticeParameters::new(params, n_periods).map(Self::new)
    }

    /// Lattice parameters.
    #[inline]
    pub fn params(&self) -> &LatticeParameters {
        &self.params
    }

    /// Up factor.
    #[inline]
    pub fn up(&self) -> f64 {
        self.params.up()
    }

    /// Down factor.
    #[inline]
    pub fn down(&self) -> f64 {
        self.params.down()
    }

    /// Risk-neutral up probability.
    #[inline]
    pub fn q(&self) -> f64 {
        self.params.q()
    }

    /// Step length.
    #[inline]
    pub fn delta_t(&self) -> f64 {
        self.params.delta_t()
    }

    /// Number of time steps.
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.params.n_periods()
    }

    /// Builds the underlying price at every node.
    pub fn build_price_lattice(&self) -> PriceLattice {
        let n = self.n_periods();
        let (up, down) = (self.up(), self.down());
        let mut nodes = TriangularLattice::zeros(n);
        nodes.level_mut(0)[0] = self.params.spot();

        for t in 1..=n {
            let (previous, current) = nodes.previous_and_level_mut(t);
            for (node, &prev) in current.iter_mut().zip(previous.iter()) {
                *node = prev * down;
            }
            current[t] = previous[t - 1] * up;
        }

        PriceLattice { nodes }
    }

    /// Prices an option by backward induction and returns every node value.
    ///
    /// # Errors
    /// `InvalidParameter("strike")` if the strike is not positive and finite.
    pub fn price_option(
        &self,
        strike: f64,
        style: ExerciseStyle,
        right: OptionRight,
    ) -> Result<PayoffLattice, PricingError> {
        require_positive("strike", strike)?;

        let n = self.n_periods();
        let prices = self.build_price_lattice();
        let mut values = TriangularLattice::zeros(n);

        for (value, &spot) in values.level_mut(n).iter_mut().zip(prices.terminal()) {
            *value = right.intrinsic(spot, strike);
        }

        let discount = self.params.step_discount();
        let q = self.q();
        let early_exercise = style.allows_early_exercise();
        let mut early_exercise_nodes = 0;

        for t in (0..n).rev() {
            let (current, next) = values.level_pair_mut(t);
            let spots = prices.level(t);
            for j in 0..=t {
                let continuation = discount * (q * next[j + 1] + (1.0 - q) * next[j]);
                current[j] = if early_exercise {
                    let exercise = right.intrinsic(spots[j], strike);
                    if exercise > continuation {
                        early_exercise_nodes += 1;
                        exercise
                    } else {
                        continuation
                    }
                } else {
                    continuation
                };
            }
        }

        Ok(PayoffLattice {
            nodes: values,
            strike,
            right,
            style,
            early_exercise_nodes,
        })
    }

    /// Like [`price_option`](Self::price_option) with the style given as text.
    ///
    /// # Errors
    /// `InvalidOptionStyle` for anything other than `european`/`american`
    /// (case-insensitive).
    pub fn price_option_str(
        &self,
        strike: f64,
        style: &str,
        right: OptionRight,
    ) -> Result<PayoffLattice, PricingError> {
        let style: ExerciseStyle = style.parse()?;
        self.price_option(strike, style, right)
    }

    /// Root value of [`price_option`](Self::price_option).
    pub fn price(
        &self,
        strike: f64,
        style: ExerciseStyle,
        right: OptionRight,
    ) -> Result<f64, PricingError> {
        self.price_option(strike, style, right)
            .map(|lattice| lattice.price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use approx::assert_relative_eq;

    fn params(s: f64, t: f64, r: f64, c: f64, sigma: f64) -> PricingParameters {
        PricingParameters::new(s, t, r, c, sigma).unwrap()
    }

    /// Σ C(n,j) q^j (1-q)^(n-j) payoff(S0 u^j d^(n-j)), discounted.
    fn binomial_sum(lp: &LatticeParameters, strike: f64, right: OptionRight) -> f64 {
        let n = lp.n_periods();
        let q = lp.q();
        let mut total = 0.0;
        let mut log_binom = 0.0_f64; // ln C(n, j)
        for j in 0..=n {
            if j > 0 {
                log_binom += ((n - j + 1) as f64).ln() - (j as f64).ln();
            }
            let spot = lp.spot() * lp.up().powi(j as i32) * lp.down().powi((n - j) as i32);
            let weight = (log_binom + j as f64 * q.ln() + (n - j) as f64 * (1.0 - q).ln()).exp();
            total += weight * right.intrinsic(spot, strike);
        }
        total * (-lp.rate() * lp.maturity()).exp()
    }

    // ==========================================================
    // Price Lattice Tests
    // ==========================================================

    #[test]
    fn test_price_lattice_root_and_shape() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.05, 0.0, 0.2), 5).unwrap();
        let lattice = model.build_price_lattice();
        assert_eq!(lattice.n_periods(), 5);
        assert_eq!(lattice.get(0, 0), Some(100.0));
        assert_eq!(lattice.terminal().len(), 6);
        assert_eq!(lattice.get(3, 4), None);
    }

    #[test]
    fn test_price_lattice_nodes_match_closed_form() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.05, 0.0, 0.3), 8).unwrap();
        let lattice = model.build_price_lattice();
        for t in 0..=8 {
            for j in 0..=t {
                let expected =
                    100.0 * model.up().powi(j as i32) * model.down().powi((t - j) as i32);
                assert_relative_eq!(lattice.get(t, j).unwrap(), expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_price_lattice_recombines() {
        // Since d = 1/u, an up then a down returns to the starting price.
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.05, 0.0, 0.2), 4).unwrap();
        let lattice = model.build_price_lattice();
        assert_relative_eq!(lattice.get(2, 1).unwrap(), 100.0, epsilon = 1e-12);
        assert_relative_eq!(lattice.get(4, 2).unwrap(), 100.0, epsilon = 1e-12);
    }

    // ==========================================================
    // Backward Induction Tests
    // ==========================================================

    #[test]
    fn test_single_period_matches_one_step_formula() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.05, 0.0, 0.2), 1).unwrap();
        let (u, d, q) = (model.up(), model.down(), model.q());
        let discount = (-0.05_f64).exp();

        let call = model
            .price(100.0, ExerciseStyle::European, OptionRight::Call)
            .unwrap();
        let expected_call = discount * (q * (100.0 * u - 100.0) + (1.0 - q) * 0.0);
        assert_relative_eq!(call, expected_call, epsilon = 1e-12);

        let put = model
            .price(100.0, ExerciseStyle::European, OptionRight::Put)
            .unwrap();
        let expected_put = discount * (1.0 - q) * (100.0 - 100.0 * d);
        assert_relative_eq!(put, expected_put, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_lattice_matches_binomial_sum() {
        let lp = LatticeParameters::with_up_factor(100.0, 0.25, 0.1194, 0.0, 10, 1.03775).unwrap();
        let model = BinomialModel::new(lp);
        assert_relative_eq!(model.delta_t(), 0.025, epsilon = 1e-15);

        for strike in [95.0, 100.0, 105.0] {
            for right in OptionRight::ALL {
                let lattice_price = model.price(strike, ExerciseStyle::European, right).unwrap();
                assert_relative_eq!(
                    lattice_price,
                    binomial_sum(&lp, strike, right),
                    max_relative = 1e-10
                );
            }
        }
    }

    #[test]
    fn test_european_converges_to_black_scholes() {
        let p = params(100.0, 1.0, 0.05, 0.02, 0.2);
        let model = BinomialModel::from_parameters(&p, 500).unwrap();
        let bs = BlackScholes::new(p, 100.0).unwrap();

        let call = model
            .price(100.0, ExerciseStyle::European, OptionRight::Call)
            .unwrap();
        let put = model
            .price(100.0, ExerciseStyle::European, OptionRight::Put)
            .unwrap();

        assert!((call - bs.price_call()).abs() / bs.price_call() < 0.01);
        assert!((put - bs.price_put()).abs() / bs.price_put() < 0.01);
    }

    #[test]
    fn test_american_put_exceeds_european() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.08, 0.0, 0.2), 200).unwrap();
        let european = model
            .price_option(110.0, ExerciseStyle::European, OptionRight::Put)
            .unwrap();
        let american = model
            .price_option(110.0, ExerciseStyle::American, OptionRight::Put)
            .unwrap();

        assert!(american.price() > european.price());
        assert!(american.early_exercise_nodes() > 0);
        assert_eq!(european.early_exercise_nodes(), 0);
    }

    #[test]
    fn test_american_call_equals_european_without_yield() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.05, 0.0, 0.25), 150).unwrap();
        for strike in [80.0, 100.0, 120.0] {
            let european = model
                .price(strike, ExerciseStyle::European, OptionRight::Call)
                .unwrap();
            let american = model
                .price(strike, ExerciseStyle::American, OptionRight::Call)
                .unwrap();
            assert_relative_eq!(american, european, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_american_call_with_yield_can_exercise_early() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.02, 0.08, 0.2), 200).unwrap();
        let european = model
            .price(90.0, ExerciseStyle::European, OptionRight::Call)
            .unwrap();
        let american = model
            .price(90.0, ExerciseStyle::American, OptionRight::Call)
            .unwrap();
        assert!(american > european);
    }

    #[test]
    fn test_payoff_lattice_terminal_level_is_intrinsic() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.05, 0.0, 0.2), 6).unwrap();
        let prices = model.build_price_lattice();
        let payoff = model
            .price_option(100.0, ExerciseStyle::European, OptionRight::Call)
            .unwrap();

        for (value, spot) in payoff.level(6).iter().zip(prices.terminal()) {
            assert_eq!(*value, (spot - 100.0).max(0.0));
        }
        assert_eq!(payoff.right(), OptionRight::Call);
        assert_eq!(payoff.style(), ExerciseStyle::European);
        assert_eq!(payoff.strike(), 100.0);
    }

    #[test]
    fn test_price_option_str() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.05, 0.0, 0.2), 20).unwrap();
        let typed = model
            .price_option(100.0, ExerciseStyle::American, OptionRight::Put)
            .unwrap();
        let text = model
            .price_option_str(100.0, "American", OptionRight::Put)
            .unwrap();
        assert_eq!(typed.price(), text.price());

        match model.price_option_str(100.0, "bermudan", OptionRight::Put) {
            Err(PricingError::InvalidOptionStyle(s)) => assert_eq!(s, "bermudan"),
            other => panic!("Expected InvalidOptionStyle, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_strike_rejected() {
        let model = BinomialModel::from_parameters(&params(100.0, 1.0, 0.05, 0.0, 0.2), 10).unwrap();
        assert!(model
            .price(0.0, ExerciseStyle::European, OptionRight::Call)
            .is_err());
        assert!(model
            .price(f64::NAN, ExerciseStyle::European, OptionRight::Call)
            .is_err());
    }
}
