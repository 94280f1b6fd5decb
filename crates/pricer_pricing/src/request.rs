//! Tagged model dispatch.
//!
//! A [`PricingRequest`] pairs validated market parameters and a strike with
//! a [`ModelSelection`]. [`price_request`] runs the selected model for both
//! rights and returns the prices with model-specific diagnostics.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::params::require_positive;
use pricer_core::types::{ExerciseStyle, OptionRight, PricingError, PricingParameters};
use pricer_models::analytical::{BlackScholes, Greeks};
use pricer_models::lattice::BinomialModel;
use tracing::debug;

use crate::mc::{Discounting, MonteCarloConfig, MonteCarloModel};

/// Default number of lattice periods.
pub const DEFAULT_LATTICE_PERIODS: usize = 200;

/// Pricing model and its settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "model", rename_all = "snake_case"))]
pub enum ModelSelection {
    /// Closed-form Black-Scholes-Merton.
    BlackScholes,
    /// GBM Monte Carlo.
    MonteCarlo {
        /// Time steps per path
        n_steps: usize,
        /// Number of paths
        n_paths: usize,
        /// Generator seed
        seed: u64,
        /// Discounting convention
        discounting: Discounting,
    },
    /// CRR binomial lattice.
    Binomial {
        /// Lattice periods
        n_periods: usize,
        /// Exercise style
        style: ExerciseStyle,
    },
}

impl ModelSelection {
    /// Monte Carlo selection from a validated configuration.
    pub fn monte_carlo(config: &MonteCarloConfig) -> Self {
        ModelSelection::MonteCarlo {
            n_steps: config.n_steps(),
            n_paths: config.n_paths(),
            seed: config.seed(),
            discounting: config.discounting(),
        }
    }

    /// Short tag: `bs`, `mc` or `binomial`.
    pub fn tag(&self) -> &'static str {
        match self {
            ModelSelection::BlackScholes => "bs",
            ModelSelection::MonteCarlo { .. } => "mc",
            ModelSelection::Binomial { .. } => "binomial",
        }
    }

    /// Human-readable model name.
    pub fn label(&self) -> String {
        match self {
            ModelSelection::BlackScholes => "Black-Scholes Model".to_string(),
            ModelSelection::MonteCarlo { .. } => "Monte Carlo Simulation".to_string(),
            ModelSelection::Binomial { style, .. } => match style {
                ExerciseStyle::European => "Binomial Model European".to_string(),
                ExerciseStyle::American => "Binomial Model American".to_string(),
            },
        }
    }
}

/// Parses a model tag with default settings for that model.
impl FromStr for ModelSelection {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bs" => Ok(ModelSelection::BlackScholes),
            "mc" => Ok(ModelSelection::monte_carlo(&MonteCarloConfig::default())),
            "binomial" => Ok(ModelSelection::Binomial {
                n_periods: DEFAULT_LATTICE_PERIODS,
                style: ExerciseStyle::default(),
            }),
            _ => Err(PricingError::UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Per-model diagnostic values reported with the prices.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ModelDiagnostics {
    /// Closed form.
    ClosedForm {
        /// d₁
        d1: f64,
        /// d₂
        d2: f64,
        /// Call sensitivities
        call_greeks: Greeks,
        /// Put sensitivities
        put_greeks: Greeks,
    },
    /// Binomial lattice.
    Lattice {
        /// Up factor
        up: f64,
        /// Down factor
        down: f64,
        /// Risk-neutral up probability
        q: f64,
        /// Step length
        delta_t: f64,
        /// Number of periods
        n_periods: usize,
        /// Exercise style
        style: ExerciseStyle,
    },
    /// Monte Carlo.
    MonteCarlo {
        /// Paths simulated
        n_paths: usize,
        /// Steps per path
        n_steps: usize,
        /// Seed used
        seed: u64,
        /// Standard error of the call estimate
        call_std_error: f64,
        /// Standard error of the put estimate
        put_std_error: f64,
        /// Discounting convention
        discounting: Discounting,
    },
}

/// A validated pricing request.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingRequest {
    /// Market parameters
    pub params: PricingParameters,
    /// Strike
    pub strike: f64,
    /// Model and settings
    pub model: ModelSelection,
}

impl PricingRequest {
    /// Bundles a request.
    pub fn new(params: PricingParameters, strike: f64, model: ModelSelection) -> Self {
        Self {
            params,
            strike,
            model,
        }
    }

    /// Shorthand for [`price_request`].
    pub fn price(&self) -> Result<PricingOutcome, PricingError> {
        price_request(self)
    }
}

/// Call and put prices with diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingOutcome {
    /// Call price
    pub call: f64,
    /// Put price
    pub put: f64,
    /// Model diagnostics
    pub diagnostics: ModelDiagnostics,
}

impl PricingOutcome {
    /// Price for one right.
    pub fn price(&self, right: OptionRight) -> f64 {
        match right {
            OptionRight::Call => self.call,
            OptionRight::Put => self.put,
        }
    }

    /// Compares `C - P` against `S0·e^(-cT) - K·e^(-rT)`.
    ///
    /// Exact for the closed form. European lattice and Monte Carlo prices
    /// satisfy it up to discretisation and sampling error; American prices
    /// need not satisfy it at all.
    pub fn parity_check(&self, params: &PricingParameters, strike: f64) -> ParityCheck {
        let lhs = self.call - self.put;
        let rhs = params.forward_intrinsic(strike);
        ParityCheck {
            lhs,
            rhs,
            abs_error: (lhs - rhs).abs(),
        }
    }
}

/// Put-call parity residual.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParityCheck {
    /// `C - P`
    pub lhs: f64,
    /// `S0·e^(-cT) - K·e^(-rT)`
    pub rhs: f64,
    /// `|lhs - rhs|`
    pub abs_error: f64,
}

impl ParityCheck {
    /// Returns `true` when the residual is within `tolerance`.
    #[inline]
    pub fn holds(&self, tolerance: f64) -> bool {
        self.abs_error <= tolerance
    }
}

/// Split of an option price into intrinsic and time value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueSplit {
    /// Immediate-exercise value at the spot
    pub intrinsic: f64,
    /// `price - intrinsic`
    pub time_value: f64,
}

/// Intrinsic value at `spot` and the remaining time value of `price`.
///
/// Time value may be negative for deep in-the-money European puts.
pub fn intrinsic_and_time_value(
    spot: f64,
    strike: f64,
    price: f64,
    right: OptionRight,
) -> ValueSplit {
    let intrinsic = right.intrinsic(spot, strike);
    ValueSplit {
        intrinsic,
        time_value: price - intrinsic,
    }
}

/// Prices both rights with the selected model.
///
/// # Errors
/// Any validation failure of the strike or the model settings.
pub fn price_request(request: &PricingRequest) -> Result<PricingOutcome, PricingError> {
    let PricingRequest {
        params,
        strike,
        model,
    } = *request;
    require_positive("strike", strike)?;
    debug!(model = model.tag(), strike, spot = params.spot(), "pricing request");

    match model {
        ModelSelection::BlackScholes => {
            let bs = BlackScholes::new(params, strike)?;
            Ok(PricingOutcome {
                call: bs.price_call(),
                put: bs.price_put(),
                diagnostics: ModelDiagnostics::ClosedForm {
                    d1: bs.d1(),
                    d2: bs.d2(),
                    call_greeks: bs.greeks(OptionRight::Call),
                    put_greeks: bs.greeks(OptionRight::Put),
                },
            })
        }
        ModelSelection::MonteCarlo {
            n_steps,
            n_paths,
            seed,
            discounting,
        } => {
            let config = MonteCarloConfig::builder()
                .n_steps(n_steps)
                .n_paths(n_paths)
                .seed(seed)
                .discounting(discounting)
                .build()?;
            let (call, put) = MonteCarloModel::new(params, config)?.estimate_pair(strike)?;
            Ok(PricingOutcome {
                call: call.price,
                put: put.price,
                diagnostics: ModelDiagnostics::MonteCarlo {
                    n_paths,
                    n_steps,
                    seed,
                    call_std_error: call.std_error,
                    put_std_error: put.std_error,
                    discounting,
                },
            })
        }
        ModelSelection::Binomial { n_periods, style } => {
            let lattice = BinomialModel::from_parameters(&params, n_periods)?;
            debug!(
                up = lattice.up(),
                down = lattice.down(),
                q = lattice.q(),
                delta_t = lattice.delta_t(),
                n_periods,
                "binomial lattice"
            );
            Ok(PricingOutcome {
                call: lattice.price(strike, style, OptionRight::Call)?,
                put: lattice.price(strike, style, OptionRight::Put)?,
                diagnostics: ModelDiagnostics::Lattice {
                    up: lattice.up(),
                    down: lattice.down(),
                    q: lattice.q(),
                    delta_t: lattice.delta_t(),
                    n_periods,
                    style,
                },
            })
        }
    }
}
