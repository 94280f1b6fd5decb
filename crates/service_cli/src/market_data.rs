//! Closing-price history loaded from CSV.
//!
//! The file needs a header row. The price column is matched by name
//! (case-insensitive, `Close` by default). When a `Date` column is present
//! rows are sorted by date, so both ascending and descending exports work.

use std::path::Path;

use chrono::NaiveDate;
use pricer_core::types::parse_iso_date;
use tracing::{debug, warn};

use crate::{CliError, Result};

/// Daily closes in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    /// Closing prices, oldest first
    pub closes: Vec<f64>,
    /// Date of the last close, when the file has a `Date` column
    pub last_date: Option<NaiveDate>,
}

impl PriceHistory {
    /// Most recent close.
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}

/// Loads the closing-price column `column` from `path`.
pub fn load_closes(path: &Path, column: &str) -> Result<PriceHistory> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let history = parse_closes(&content, column)?;
    debug!(
        file = %path.display(),
        rows = history.closes.len(),
        "loaded closing prices"
    );
    Ok(history)
}

/// Parses closing prices from CSV text.
pub fn parse_closes(content: &str, column: &str) -> Result<PriceHistory> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let price_idx = find(column).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "column '{}' not found; available: {}",
            column,
            headers.iter().collect::<Vec<_>>().join(", ")
        ))
    })?;
    let date_idx = find("date");

    let mut rows: Vec<(Option<NaiveDate>, f64)> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let raw = record.get(price_idx).unwrap_or("").trim();
        if raw.is_empty() {
            warn!(row = line + 1, "skipping row with empty price");
            continue;
        }
        let price: f64 = raw.parse().map_err(|_| {
            CliError::InvalidArgument(format!("row {}: '{}' is not a number", line + 1, raw))
        })?;
        let date = match date_idx.and_then(|i| record.get(i)) {
            Some(d) => Some(parse_iso_date(d)?),
            None => None,
        };
        rows.push((date, price));
    }

    if date_idx.is_some() {
        rows.sort_by_key(|(date, _)| *date);
    }

    Ok(PriceHistory {
        last_date: rows.last().and_then(|(date, _)| *date),
        closes: rows.into_iter().map(|(_, price)| price).collect(),
    })
}
