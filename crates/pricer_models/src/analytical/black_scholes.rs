//! Black-Scholes-Merton closed-form model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-cT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = C + K·e^(-rT) - S·e^(-cT) (put-call parity)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - c + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The put is derived from the call through parity, so `C - P` equals
//! `S·e^(-cT) - K·e^(-rT)` to floating-point precision by construction.

use pricer_core::math::{norm_cdf, norm_pdf};
use pricer_core::types::params::require_positive;
use pricer_core::types::{OptionRight, PricingError, PricingParameters};

/// First-order sensitivities plus gamma for one option right.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t (calendar time, usually negative)
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

/// Black-Scholes-Merton model bound to one strike.
///
/// `d1` and `d2` are computed once at construction and kept as diagnostic
/// values.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingParameters;
/// use pricer_models::analytical::BlackScholes;
///
/// let params = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let bs = BlackScholes::new(params, 100.0).unwrap();
///
/// assert!((bs.price_call() - 10.4506).abs() < 1e-3);
///
/// // Put-call parity: C - P = S·e^(-cT) - K·e^(-rT)
/// let parity = bs.price_call() - bs.price_put() - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes {
    params: PricingParameters,
    /// Strike price (K)
    strike: f64,
    d1: f64,
    d2: f64,
}

impl BlackScholes {
    /// Creates the model and evaluates `d1`, `d2`.
    ///
    /// `T > 0` and `σ > 0` are guaranteed by [`PricingParameters`].
    ///
    /// # Errors
    /// - `PricingError::InvalidParameter` if the strike is not positive and finite
    pub fn new(params: PricingParameters, strike: f64) -> Result<Self, PricingError> {
        require_positive("strike", strike)?;

        let sigma = params.volatility();
        let expiry = params.maturity();
        let vol_sqrt_t = sigma * expiry.sqrt();

        let log_moneyness = (params.spot() / strike).ln();
        let drift = (params.rate() - params.dividend_yield() + 0.5 * sigma * sigma) * expiry;
        let d1 = (log_moneyness + drift) / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        Ok(Self {
            params,
            strike,
            d1,
            d2,
        })
    }

    /// Returns the market parameters.
    #[inline]
    pub fn params(&self) -> &PricingParameters {
        &self.params
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// The d₁ term.
    #[inline]
    pub fn d1(&self) -> f64 {
        self.d1
    }

    /// The d₂ term, d₁ - σ√T.
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// European call price.
    #[inline]
    pub fn price_call(&self) -> f64 {
        let p = &self.params;
        p.yield_factor() * p.spot() * norm_cdf(self.d1)
            - p.discount_factor() * self.strike * norm_cdf(self.d2)
    }

    /// European put price via put-call parity.
    #[inline]
    pub fn price_put(&self) -> f64 {
        let p = &self.params;
        self.price_call() + self.strike * p.discount_factor() - p.spot() * p.yield_factor()
    }

    /// Price for the given right.
    pub fn price(&self, right: OptionRight) -> f64 {
        match right {
            OptionRight::Call => self.price_call(),
            OptionRight::Put => self.price_put(),
        }
    }

    /// Analytical Greeks for the given right.
    ///
    /// - Delta: e^(-cT)·N(d₁) for calls, e^(-cT)·(N(d₁) - 1) for puts
    /// - Gamma: e^(-cT)·φ(d₁) / (S·σ·√T)
    /// - Vega: S·e^(-cT)·√T·φ(d₁)
    /// - Theta: -S·e^(-cT)·φ(d₁)·σ/(2√T) ∓ r·K·e^(-rT)·N(±d₂) ± c·S·e^(-cT)·N(±d₁)
    /// - Rho: ±K·T·e^(-rT)·N(±d₂)
    pub fn greeks(&self, right: OptionRight) -> Greeks {
        let p = &self.params;
        let (s, k, t) = (p.spot(), self.strike, p.maturity());
        let (r, c, sigma) = (p.rate(), p.dividend_yield(), p.volatility());
        let sqrt_t = t.sqrt();
        let df = p.discount_factor();
        let yf = p.yield_factor();
        let pdf_d1 = norm_pdf(self.d1);

        let gamma = yf * pdf_d1 / (s * sigma * sqrt_t);
        let vega = s * yf * sqrt_t * pdf_d1;
        let decay = -(s * yf * pdf_d1 * sigma) / (2.0 * sqrt_t);

        match right {
            OptionRight::Call => Greeks {
                delta: yf * norm_cdf(self.d1),
                gamma,
                vega,
                theta: decay - r * k * df * norm_cdf(self.d2) + c * s * yf * norm_cdf(self.d1),
                rho: k * t * df * norm_cdf(self.d2),
            },
            OptionRight::Put => Greeks {
                delta: yf * (norm_cdf(self.d1) - 1.0),
                gamma,
                vega,
                theta: decay + r * k * df * norm_cdf(-self.d2)
                    - c * s * yf * norm_cdf(-self.d1),
                rho: -k * t * df * norm_cdf(-self.d2),
            },
        }
    }
}
