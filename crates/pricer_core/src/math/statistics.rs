//! Return statistics for estimating model inputs from price histories.
//!
//! The pricing models take an annualised volatility as input. When only a
//! series of closing prices is available, [`historical_volatility`] gives the
//! usual estimate: sample standard deviation of periodic returns scaled by
//! `sqrt(periods_per_year)`.

use std::str::FromStr;

use crate::types::PricingError;

/// Trading days per year used to annualise daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// How periodic returns are measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReturnKind {
    /// Percentage change, `P_t / P_{t-1} - 1`.
    #[default]
    Simple,
    /// Log return, `ln(P_t / P_{t-1})`.
    Log,
}

impl FromStr for ReturnKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "pct" => Ok(ReturnKind::Simple),
            "log" => Ok(ReturnKind::Log),
            other => Err(PricingError::invalid_parameter(
                "returns",
                format!("unknown return kind '{}', expected 'simple' or 'log'", other),
            )),
        }
    }
}

/// Periodic returns of a price series.
///
/// # Errors
/// `InvalidParameter` if any price is non-finite or non-positive.
pub fn returns(prices: &[f64], kind: ReturnKind) -> Result<Vec<f64>, PricingError> {
    if let Some(bad) = prices.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
        return Err(PricingError::invalid_parameter(
            "prices",
            format!("prices must be positive and finite, got {}", bad),
        ));
    }

    Ok(prices
        .windows(2)
        .map(|w| match kind {
            ReturnKind::Simple => w[1] / w[0] - 1.0,
            ReturnKind::Log => (w[1] / w[0]).ln(),
        })
        .collect())
}

/// Sample standard deviation (n - 1 denominator).
///
/// Returns `None` for fewer than two observations.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Annualised historical volatility of a price series.
///
/// # Errors
/// `InvalidParameter` when fewer than three prices are supplied (two returns
/// are needed for a sample standard deviation), a price is non-positive, or
/// `periods_per_year` is not positive.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::{historical_volatility, ReturnKind};
///
/// // Constant growth has zero volatility
/// let prices = [100.0, 101.0, 102.01, 103.0301];
/// let vol = historical_volatility(&prices, ReturnKind::Simple, 252.0).unwrap();
/// assert!(vol < 1e-12);
/// ```
pub fn historical_volatility(
    prices: &[f64],
    kind: ReturnKind,
    periods_per_year: f64,
) -> Result<f64, PricingError> {
    if !(periods_per_year.is_finite() && periods_per_year > 0.0) {
        return Err(PricingError::invalid_parameter(
            "periods_per_year",
            format!("must be positive, got {}", periods_per_year),
        ));
    }

    let rets = returns(prices, kind)?;
    let std = sample_std_dev(&rets).ok_or_else(|| {
        PricingError::invalid_parameter(
            "prices",
            format!("need at least 3 prices, got {}", prices.len()),
        )
    })?;

    Ok(std * periods_per_year.sqrt())
}

/// Strike range offered around a spot price: `[max(0.1, 0.75·S), 1.3·S]`,
/// both ends rounded to cents.
pub fn suggested_strike_range(spot: f64) -> (f64, f64) {
    let round_cents = |x: f64| (x * 100.0).round() / 100.0;
    (
        round_cents((spot * 0.75).max(0.1)),
        round_cents(spot * 1.3),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_and_log_returns() {
        let prices = [100.0, 110.0, 99.0];
        let simple = returns(&prices, ReturnKind::Simple).unwrap();
        assert_relative_eq!(simple[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(simple[1], -0.1, epsilon = 1e-12);

        let log = returns(&prices, ReturnKind::Log).unwrap();
        assert_relative_eq!(log[0], 1.1_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(log[1], 0.9_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_std_dev_uses_n_minus_one() {
        // mean 0, squares sum 2, n - 1 = 1
        let std = sample_std_dev(&[1.0, -1.0]).unwrap();
        assert_relative_eq!(std, 2.0_f64.sqrt(), epsilon = 1e-12);
        assert!(sample_std_dev(&[1.0]).is_none());
        assert!(sample_std_dev(&[]).is_none());
    }

    #[test]
    fn test_historical_volatility_annualisation() {
        // Alternating +10% / -10% moves
        let prices = [100.0, 110.0, 99.0, 108.9, 98.01];
        let vol = historical_volatility(&prices, ReturnKind::Simple, 252.0).unwrap();
        let daily = sample_std_dev(&[0.1, -0.1, 0.1, -0.1]).unwrap();
        assert_relative_eq!(vol, daily * 252.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_historical_volatility_rejects_short_series() {
        let err = historical_volatility(&[100.0, 101.0], ReturnKind::Log, 252.0).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_historical_volatility_rejects_bad_prices() {
        assert!(historical_volatility(&[100.0, 0.0, 101.0], ReturnKind::Log, 252.0).is_err());
        assert!(historical_volatility(&[100.0, f64::NAN, 101.0], ReturnKind::Log, 252.0).is_err());
        assert!(historical_volatility(&[100.0, 101.0, 102.0], ReturnKind::Log, 0.0).is_err());
    }

    #[test]
    fn test_return_kind_parsing() {
        assert_eq!("simple".parse::<ReturnKind>().unwrap(), ReturnKind::Simple);
        assert_eq!("PCT".parse::<ReturnKind>().unwrap(), ReturnKind::Simple);
        assert_eq!("log".parse::<ReturnKind>().unwrap(), ReturnKind::Log);
        assert!("arith".parse::<ReturnKind>().is_err());
    }

    #[test]
    fn test_suggested_strike_range() {
        let (lo, hi) = suggested_strike_range(200.0);
        assert_relative_eq!(lo, 150.0, epsilon = 1e-12);
        assert_relative_eq!(hi, 260.0, epsilon = 1e-12);

        let (lo, _) = suggested_strike_range(0.05);
        assert_relative_eq!(lo, 0.1, epsilon = 1e-12);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;
        use proptest::prelude::prop;

        proptest! {
            #[test]
            fn volatility_is_scale_invariant(
                prices in prop::collection::vec(1.0f64..1_000.0, 3..60),
                scale in 0.01f64..100.0,
            ) {
                let scaled: Vec<f64> = prices.iter().map(|p| p * scale).collect();
                let a = historical_volatility(&prices, ReturnKind::Log, TRADING_DAYS_PER_YEAR).unwrap();
                let b = historical_volatility(&scaled, ReturnKind::Log, TRADING_DAYS_PER_YEAR).unwrap();
                prop_assert!((a - b).abs() <= 1e-9 * (1.0 + a));
                prop_assert!(a >= 0.0);
            }
        }
    }
}
