//! Numerical building blocks shared by the pricing models.
//!
//! - [`distributions`]: standard normal CDF and PDF
//! - [`statistics`]: return series and historical volatility estimation

pub mod distributions;
pub mod statistics;

pub use distributions::{norm_cdf, norm_pdf};
pub use statistics::{historical_volatility, suggested_strike_range, ReturnKind};
