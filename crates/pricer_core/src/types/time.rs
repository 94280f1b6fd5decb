//! Maturity handling for option pricing.
//!
//! Expiry dates are converted to year fractions with the Act/365 convention.
//! Maturities are floored at one day so that an expiry on (or before) the
//! valuation date still yields a strictly positive `T`.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_core::types::time::maturity_from_dates;
//!
//! let valuation = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//!
//! let m = maturity_from_dates(valuation, expiry);
//! assert_eq!(m.days, 182);
//! assert!((m.years - 182.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Local, NaiveDate};

use super::error::DateError;

/// Days per year under Act/365.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Minimum maturity in days.
pub const MIN_MATURITY_DAYS: i64 = 1;

/// Time to maturity in calendar days and Act/365 years.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maturity {
    /// Calendar days from valuation to expiry (unfloored, may be negative).
    pub days: i64,
    /// Year fraction used for pricing, floored at one day.
    pub years: f64,
}

/// Computes the maturity between `valuation` and `expiry`.
///
/// `years = max(days, 1) / 365`. `days` keeps the raw calendar difference
/// for display.
pub fn maturity_from_dates(valuation: NaiveDate, expiry: NaiveDate) -> Maturity {
    let days = (expiry - valuation).num_days();
    let years = days.max(MIN_MATURITY_DAYS) as f64 / DAYS_PER_YEAR;
    Maturity { days, years }
}

/// Computes the maturity from today's local date to `expiry`.
pub fn maturity_from_today(expiry: NaiveDate) -> Maturity {
    maturity_from_dates(Local::now().date_naive(), expiry)
}

/// Parses an ISO 8601 date, ignoring anything after the first 10 characters
/// (so `2025-03-21T00:00:00` is accepted).
///
/// # Examples
/// ```
/// use pricer_core::types::time::parse_iso_date;
///
/// let d = parse_iso_date("2025-03-21T00:00:00").unwrap();
/// assert_eq!(d.to_string(), "2025-03-21");
/// assert!(parse_iso_date("21/03/2025").is_err());
/// ```
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, DateError> {
    let head = s.trim().get(..10).unwrap_or(s.trim());
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
}
