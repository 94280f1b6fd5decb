//! Price command implementation
//!
//! Prices a call and a put with the selected model and reports the model
//! diagnostics, the intrinsic/time value split and a put-call parity check.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args};
use pricer_core::math::{historical_volatility, ReturnKind};
use pricer_core::math::statistics::TRADING_DAYS_PER_YEAR;
use pricer_core::types::{
    maturity_from_dates, maturity_from_today, parse_iso_date, OptionRight, PricingParameters,
};
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloModel};
use pricer_pricing::request::{
    intrinsic_and_time_value, ModelDiagnostics, ModelSelection, ParityCheck, PricingOutcome,
    PricingRequest, ValueSplit,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PricerConfig;
use crate::market_data::{load_closes, PriceHistory};
use crate::output::{money, percent, OutputFormat, Table};
use crate::{CliError, Result};

/// Paths shown in the table view; JSON output carries all requested paths.
const TABLE_PATHS: usize = 10;

/// Points per path shown in the table view.
const TABLE_POINTS: usize = 6;

/// Arguments of `pricer price`
#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("term").required(true).args(["maturity", "expiry"])))]
pub struct PriceArgs {
    /// Pricing model (bs, mc, binomial)
    #[arg(short, long, default_value = "bs")]
    pub model: String,

    /// Spot price (defaults to the last close when --prices is given)
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Time to maturity in years
    #[arg(short = 't', long)]
    pub maturity: Option<f64>,

    /// Expiry date (YYYY-MM-DD), Act/365 from the valuation date
    #[arg(short, long)]
    pub expiry: Option<String>,

    /// Valuation date for --expiry (YYYY-MM-DD, default today)
    #[arg(long, requires = "expiry")]
    pub valuation_date: Option<String>,

    /// Continuously compounded risk-free rate (decimal)
    #[arg(short, long, allow_hyphen_values = true)]
    pub rate: f64,

    /// Annualised volatility (decimal; defaults to the historical estimate with --prices)
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Continuous dividend yield (decimal)
    #[arg(long = "yield", default_value_t = 0.0, allow_hyphen_values = true)]
    pub dividend_yield: f64,

    /// Time steps (Monte Carlo steps per path or lattice periods)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Number of Monte Carlo paths
    #[arg(long)]
    pub paths: Option<usize>,

    /// Monte Carlo seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exercise style for the lattice (european, american)
    #[arg(long)]
    pub style: Option<String>,

    /// Monte Carlo discounting (discounted, undiscounted)
    #[arg(long)]
    pub discounting: Option<String>,

    /// CSV file of closing prices
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Price column in the CSV file
    #[arg(long, default_value = "Close")]
    pub column: String,

    /// Number of simulated paths to print (Monte Carlo only)
    #[arg(long)]
    pub show_paths: Option<usize>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Maturity resolved from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Term {
    years: f64,
    days: Option<i64>,
    expiry: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct PathsReport {
    times: Vec<f64>,
    values: Vec<Vec<f64>>,
}

#[derive(Debug, Serialize)]
struct PriceReport {
    model: &'static str,
    label: String,
    spot: f64,
    strike: f64,
    maturity_years: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_to_maturity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry: Option<NaiveDate>,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    volatility_source: &'static str,
    call: f64,
    put: f64,
    call_value: ValueSplit,
    put_value: ValueSplit,
    parity: ParityCheck,
    diagnostics: ModelDiagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<PathsReport>,
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &PricerConfig) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;

    let history = args
        .prices
        .as_deref()
        .map(|path| load_closes(path, &args.column))
        .transpose()?;

    let spot = resolve_spot(args.spot, history.as_ref())?;
    let (volatility, volatility_source) = resolve_volatility(args.volatility, history.as_ref())?;
    let term = resolve_term(args)?;

    let params = PricingParameters::new(
        spot,
        term.years,
        args.rate,
        args.dividend_yield,
        volatility,
    )?;
    let model = select_model(args, config)?;

    info!("Starting pricing...");
    info!(
        model = model.tag(),
        spot,
        strike = args.strike,
        maturity = term.years,
        rate = args.rate,
        volatility,
        "Pricing request"
    );

    let outcome = PricingRequest::new(params, args.strike, model).price()?;
    let paths = simulated_paths(args, &params, &model)?;

    let report = build_report(&params, args.strike, term, &model, &outcome, volatility_source, paths);

    match format {
        OutputFormat::Table => print!("{}", render_table(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    info!("Pricing complete");
    Ok(())
}

fn resolve_spot(spot: Option<f64>, history: Option<&PriceHistory>) -> Result<f64> {
    match (spot, history) {
        (Some(spot), _) => Ok(spot),
        (None, Some(history)) => history.last_close().ok_or_else(|| {
            CliError::InvalidArgument("price file contains no closing prices".to_string())
        }),
        (None, None) => Err(CliError::InvalidArgument(
            "--spot is required unless --prices is given".to_string(),
        )),
    }
}

fn resolve_volatility(
    volatility: Option<f64>,
    history: Option<&PriceHistory>,
) -> Result<(f64, &'static str)> {
    match (volatility, history) {
        (Some(vol), _) => Ok((vol, "input")),
        (None, Some(history)) => {
            let vol = historical_volatility(
                &history.closes,
                ReturnKind::Simple,
                TRADING_DAYS_PER_YEAR,
            )?;
            info!(volatility = vol, observations = history.closes.len(), "Historical volatility");
            Ok((vol, "historical"))
        }
        (None, None) => Err(CliError::InvalidArgument(
            "--volatility is required unless --prices is given".to_string(),
        )),
    }
}

fn resolve_term(args: &PriceArgs) -> Result<Term> {
    match (args.maturity, args.expiry.as_deref()) {
        (Some(years), None) => Ok(Term {
            years,
            days: None,
            expiry: None,
        }),
        (None, Some(expiry)) => {
            let expiry = parse_iso_date(expiry)?;
            let maturity = match args.valuation_date.as_deref() {
                Some(valuation) => maturity_from_dates(parse_iso_date(valuation)?, expiry),
                None => maturity_from_today(expiry),
            };
            if maturity.days < 1 {
                warn!(
                    days = maturity.days,
                    "Expiry is not after the valuation date; maturity floored to one day"
                );
            }
            Ok(Term {
                years: maturity.years,
                days: Some(maturity.days),
                expiry: Some(expiry),
            })
        }
        _ => Err(CliError::InvalidArgument(
            "exactly one of --maturity or --expiry is required".to_string(),
        )),
    }
}

fn select_model(args: &PriceArgs, config: &PricerConfig) -> Result<ModelSelection> {
    let model = match args.model.parse::<ModelSelection>()? {
        ModelSelection::BlackScholes => {
            if args.steps.is_some() || args.paths.is_some() || args.style.is_some() {
                warn!("--steps, --paths and --style are ignored by the closed-form model");
            }
            ModelSelection::BlackScholes
        }
        ModelSelection::MonteCarlo { .. } => {
            if args.style.is_some() {
                warn!("--style is ignored by Monte Carlo; European exercise is assumed");
            }
            let discounting = match args.discounting.as_deref() {
                Some(text) => text.parse()?,
                None => config.monte_carlo.discounting,
            };
            let mc = MonteCarloConfig::builder()
                .n_paths(args.paths.unwrap_or(config.monte_carlo.n_paths))
                .n_steps(args.steps.unwrap_or(config.monte_carlo.n_steps))
                .seed(args.seed.unwrap_or(config.monte_carlo.seed))
                .discounting(discounting)
                .build()?;
            ModelSelection::monte_carlo(&mc)
        }
        ModelSelection::Binomial { .. } => {
            if args.paths.is_some() || args.seed.is_some() {
                warn!("--paths and --seed are ignored by the binomial model");
            }
            let style = match args.style.as_deref() {
                Some(text) => text.parse()?,
                None => config.lattice.style,
            };
            ModelSelection::Binomial {
                n_periods: args.steps.unwrap_or(config.lattice.n_periods),
                style,
            }
        }
    };
    Ok(model)
}

fn simulated_paths(
    args: &PriceArgs,
    params: &PricingParameters,
    model: &ModelSelection,
) -> Result<Option<PathsReport>> {
    let n_show = match args.show_paths {
        Some(n) if n > 0 => n,
        _ => return Ok(None),
    };

    let ModelSelection::MonteCarlo {
        n_steps,
        n_paths,
        seed,
        discounting,
    } = *model
    else {
        warn!("--show-paths only applies to the Monte Carlo model");
        return Ok(None);
    };

    let config = MonteCarloConfig::builder()
        .n_steps(n_steps)
        .n_paths(n_paths)
        .seed(seed)
        .discounting(discounting)
        .build()?;
    let paths = MonteCarloModel::new(*params, config)?.simulate_paths(n_show)?;

    Ok(Some(PathsReport {
        times: paths.times(),
        values: paths.iter().map(<[f64]>::to_vec).collect(),
    }))
}

fn build_report(
    params: &PricingParameters,
    strike: f64,
    term: Term,
    model: &ModelSelection,
    outcome: &PricingOutcome,
    volatility_source: &'static str,
    paths: Option<PathsReport>,
) -> PriceReport {
    let spot = params.spot();
    PriceReport {
        model: model.tag(),
        label: model.label(),
        spot,
        strike,
        maturity_years: params.maturity(),
        days_to_maturity: term.days,
        expiry: term.expiry,
        rate: params.rate(),
        dividend_yield: params.dividend_yield(),
        volatility: params.volatility(),
        volatility_source,
        call: outcome.call,
        put: outcome.put,
        call_value: intrinsic_and_time_value(spot, strike, outcome.call, OptionRight::Call),
        put_value: intrinsic_and_time_value(spot, strike, outcome.put, OptionRight::Put),
        parity: outcome.parity_check(params, strike),
        diagnostics: outcome.diagnostics,
        paths,
    }
}

fn render_table(report: &PriceReport) -> String {
    let mut inputs = Table::new(report.label.clone());
    inputs
        .row("Spot Price S0", money(report.spot))
        .row("Strike K", money(report.strike));
    if let Some(days) = report.days_to_maturity {
        inputs.row("Days to Maturity", days.to_string());
    }
    inputs
        .row("T (years)", format!("{:.6}", report.maturity_years))
        .row("Risk-Free Rate r", percent(report.rate))
        .row("Dividend Yield c", percent(report.dividend_yield))
        .row(
            format!("Volatility σ ({})", report.volatility_source),
            percent(report.volatility),
        );

    match report.diagnostics {
        ModelDiagnostics::ClosedForm {
            d1,
            d2,
            call_greeks,
            put_greeks,
        } => {
            inputs
                .row("d₁", format!("{:.6}", d1))
                .row("d₂", format!("{:.6}", d2));
            for (name, g) in [("Call", call_greeks), ("Put", put_greeks)] {
                inputs
                    .row(format!("{} Delta", name), format!("{:.6}", g.delta))
                    .row(format!("{} Gamma", name), format!("{:.6}", g.gamma))
                    .row(format!("{} Vega", name), format!("{:.6}", g.vega))
                    .row(format!("{} Theta", name), format!("{:.6}", g.theta))
                    .row(format!("{} Rho", name), format!("{:.6}", g.rho));
            }
        }
        ModelDiagnostics::Lattice {
            up,
            down,
            q,
            delta_t,
            n_periods,
            style,
        } => {
            inputs
                .row("Option Style", style.to_string())
                .row("Time Steps N", n_periods.to_string())
                .row("Up Factor u", format!("{:.6}", up))
                .row("Down Factor d", format!("{:.6}", down))
                .row("Risk-Neutral q", format!("{:.6}", q))
                .row("Δt", format!("{:.8}", delta_t));
        }
        ModelDiagnostics::MonteCarlo {
            n_paths,
            n_steps,
            seed,
            call_std_error,
            put_std_error,
            discounting,
        } => {
            inputs
                .row("Simulations", n_paths.to_string())
                .row("Steps per path", n_steps.to_string())
                .row("Random seed", seed.to_string())
                .row("Discounting", discounting.to_string())
                .row("Call std error", format!("{:.6}", call_std_error))
                .row("Put std error", format!("{:.6}", put_std_error));
        }
    }

    let mut prices = Table::new("Prices");
    prices
        .row("Call Price", money(report.call))
        .row("  intrinsic", money(report.call_value.intrinsic))
        .row("  time value", money(report.call_value.time_value))
        .row("Put Price", money(report.put))
        .row("  intrinsic", money(report.put_value.intrinsic))
        .row("  time value", money(report.put_value.time_value))
        .row("C - P", format!("{:.6}", report.parity.lhs))
        .row("S·e^(-cT) - K·e^(-rT)", format!("{:.6}", report.parity.rhs))
        .row("Parity error", format!("{:.2e}", report.parity.abs_error));

    let mut out = inputs.render();
    out.push_str(&prices.render());
    if let Some(paths) = &report.paths {
        out.push_str(&render_paths(paths));
    }
    out
}

fn render_paths(paths: &PathsReport) -> String {
    let n_points = paths.times.len();
    let stride = ((n_points - 1) / (TABLE_POINTS - 1)).max(1);
    let mut columns: Vec<usize> = (0..n_points).step_by(stride).collect();
    if columns.last() != Some(&(n_points - 1)) {
        columns.push(n_points - 1);
    }

    let mut out = String::from("\nSimulated paths (t in years)\n");
    out.push_str(&format!("{:>6}", "path"));
    for &c in &columns {
        out.push_str(&format!(" {:>10.4}", paths.times[c]));
    }
    out.push('\n');
    for (i, path) in paths.values.iter().take(TABLE_PATHS).enumerate() {
        out.push_str(&format!("{:>6}", i));
        for &c in &columns {
            out.push_str(&format!(" {:>10.4}", path[c]));
        }
        out.push('\n');
    }
    if paths.values.len() > TABLE_PATHS {
        out.push_str(&format!(
            "... {} more (use --format json for all paths)\n",
            paths.values.len() - TABLE_PATHS
        ));
    }
    out
}
