//! Historical volatility command

use std::path::Path;

use chrono::NaiveDate;
use pricer_core::math::statistics::TRADING_DAYS_PER_YEAR;
use pricer_core::math::{historical_volatility, suggested_strike_range, ReturnKind};
use serde::Serialize;
use tracing::info;

use crate::market_data::{load_closes, PriceHistory};
use crate::output::{money, percent, OutputFormat, Table};
use crate::{CliError, Result};

#[derive(Debug, Serialize)]
struct VolReport {
    observations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_date: Option<NaiveDate>,
    spot: f64,
    returns: ReturnKind,
    volatility: f64,
    strike_min: f64,
    strike_max: f64,
}

/// Run the vol command
pub fn run(prices: &Path, column: &str, returns: &str, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let kind: ReturnKind = returns.parse()?;

    info!(file = %prices.display(), column, "Estimating historical volatility");
    let history = load_closes(prices, column)?;
    let report = build_report(&history, kind)?;

    match format {
        OutputFormat::Table => print!("{}", render_table(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn build_report(history: &PriceHistory, kind: ReturnKind) -> Result<VolReport> {
    let spot = history
        .last_close()
        .ok_or_else(|| CliError::InvalidArgument("price file contains no closing prices".to_string()))?;
    let volatility = historical_volatility(&history.closes, kind, TRADING_DAYS_PER_YEAR)?;
    let (strike_min, strike_max) = suggested_strike_range(spot);

    Ok(VolReport {
        observations: history.closes.len(),
        last_date: history.last_date,
        spot,
        returns: kind,
        volatility,
        strike_min,
        strike_max,
    })
}

fn render_table(report: &VolReport) -> String {
    let mut table = Table::new("Historical Volatility");
    table.row("Observations", report.observations.to_string());
    if let Some(date) = report.last_date {
        table.row("Last Date", date.to_string());
    }
    let returns = match report.returns {
        ReturnKind::Simple => "simple",
        ReturnKind::Log => "log",
    };
    table
        .row("Spot Price S0 (last close)", money(report.spot))
        .row("Returns", returns)
        .row("Annualised Volatility σ", percent(report.volatility))
        .row(
            "Suggested Strike Range",
            format!("{} - {}", money(report.strike_min), money(report.strike_max)),
        );
    table.render()
}
