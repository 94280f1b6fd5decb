//! Option contract enumerations.
//!
//! - [`OptionRight`]: call or put
//! - [`ExerciseStyle`]: European or American
//!
//! Both are closed enumerations so that an invalid right or style cannot be
//! represented once parsed. Text parsing is the only fallible entry point.

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// The right conveyed by an option contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionRight {
    /// Right to buy the underlying at the strike.
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionRight {
    /// Immediate-exercise payoff at underlying price `spot`.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionRight;
    ///
    /// assert_eq!(OptionRight::Call.intrinsic(110.0, 100.0), 10.0);
    /// assert_eq!(OptionRight::Put.intrinsic(110.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionRight::Call => (spot - strike).max(0.0),
            OptionRight::Put => (strike - spot).max(0.0),
        }
    }

    /// Both rights, call first.
    pub const ALL: [OptionRight; 2] = [OptionRight::Call, OptionRight::Put];
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionRight::Call => write!(f, "call"),
            OptionRight::Put => write!(f, "put"),
        }
    }
}

/// Exercise style of an option.
///
/// # Examples
/// ```
/// use pricer_core::types::{ExerciseStyle, PricingError};
///
/// let style: ExerciseStyle = "American".parse().unwrap();
/// assert_eq!(style, ExerciseStyle::American);
///
/// let err = "bermudan".parse::<ExerciseStyle>().unwrap_err();
/// assert!(matches!(err, PricingError::InvalidOptionStyle(_)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Exercisable only at expiry.
    #[default]
    European,
    /// Exercisable at any time up to expiry.
    American,
}

impl ExerciseStyle {
    /// Returns `true` when early exercise is permitted.
    #[inline]
    pub fn allows_early_exercise(self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Lowercase name used in text inputs.
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseStyle::European => "european",
            ExerciseStyle::American => "american",
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "european" => Ok(ExerciseStyle::European),
            "american" => Ok(ExerciseStyle::American),
            _ => Err(PricingError::InvalidOptionStyle(s.to_string())),
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
