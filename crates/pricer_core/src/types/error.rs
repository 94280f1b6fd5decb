//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised synchronously by the pricing models
//! - `DateError`: Errors from date parsing

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every pricing model validates its inputs at construction time and
/// surfaces failures through this type. Nothing is silently clamped or
/// defaulted; the caller decides how to present the failure.
///
/// # Variants
/// - `InvalidParameter`: Non-positive or non-finite inputs, zero step or
///   path counts, an ill-posed lattice probability, short price histories
/// - `InvalidOptionStyle`: Exercise style text outside `{european, american}`
/// - `UnknownModel`: Model tag outside `{bs, mc, binomial}`
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("sigma", "must be positive, got 0");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'sigma': must be positive, got 0"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A numeric parameter failed validation.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as used in the model formulas
        name: &'static str,
        /// Description of why the value was rejected
        reason: String,
    },

    /// Exercise style outside the supported set.
    #[error("Invalid option style '{0}': expected 'european' or 'american'")]
    InvalidOptionStyle(String),

    /// Model selection tag outside the supported set.
    #[error("Unknown pricing model '{0}': expected 'bs', 'mc' or 'binomial'")]
    UnknownModel(String),
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for parameter validation failures.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PricingError::InvalidParameter { .. })
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::ParseError("2024-13-01".to_string());
/// assert!(format!("{}", err).contains("2024-13-01"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Failed to parse an ISO 8601 date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}
