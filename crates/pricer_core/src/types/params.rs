//! Common market parameter bundle shared by every pricing model.

use super::error::PricingError;

/// Immutable pricing inputs: spot, maturity, rate, yield and volatility.
///
/// Invariants enforced at construction:
/// - every field is finite
/// - `spot > 0`, `maturity > 0`, `volatility > 0`
///
/// `rate` and `dividend_yield` may take any finite value, including negative.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingParameters;
///
/// let params = PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// assert_eq!(params.spot(), 100.0);
///
/// // Zero volatility makes d1 undefined
/// assert!(PricingParameters::new(100.0, 1.0, 0.05, 0.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPricingParameters"))]
pub struct PricingParameters {
    /// Spot price (S0)
    spot: f64,
    /// Time to maturity in years (T)
    maturity: f64,
    /// Continuously compounded risk-free rate (r)
    rate: f64,
    /// Continuous dividend/carry yield (c)
    dividend_yield: f64,
    /// Annualised volatility (σ)
    volatility: f64,
}

impl PricingParameters {
    /// Creates a validated parameter bundle.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the first offending field.
    pub fn new(
        spot: f64,
        maturity: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        require_positive("spot", spot)?;
        require_positive("maturity", maturity)?;
        require_finite("rate", rate)?;
        require_finite("dividend_yield", dividend_yield)?;
        require_positive("volatility", volatility)?;

        Ok(Self {
            spot,
            maturity,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Discount factor to maturity, `e^(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Yield discount factor to maturity, `e^(-cT)`.
    #[inline]
    pub fn yield_factor(&self) -> f64 {
        (-self.dividend_yield * self.maturity).exp()
    }

    /// Right-hand side of put-call parity for strike `K`:
    /// `S0·e^(-cT) - K·e^(-rT)`.
    #[inline]
    pub fn forward_intrinsic(&self, strike: f64) -> f64 {
        self.spot * self.yield_factor() - strike * self.discount_factor()
    }
}

/// Unvalidated wire form; deserialization goes through [`PricingParameters::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPricingParameters {
    spot: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPricingParameters> for PricingParameters {
    type Error = PricingError;

    fn try_from(raw: RawPricingParameters) -> Result<Self, Self::Error> {
        Self::new(
            raw.spot,
            raw.maturity,
            raw.rate,
            raw.dividend_yield,
            raw.volatility,
        )
    }
}

/// Rejects NaN and infinities.
pub fn require_finite(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

/// Rejects non-finite and non-positive values.
pub fn require_positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be positive, got {}", value),
        ))
    }
}

/// Rejects zero counts (steps, periods, paths).
pub fn require_count(name: &'static str, value: usize) -> Result<(), PricingError> {
    if value == 0 {
        Err(PricingError::invalid_parameter(name, "must be at least 1"))
    } else {
        Ok(())
    }
}
