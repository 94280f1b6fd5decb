//! Monte Carlo simulation configuration.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of stored path values, `n_paths × (n_steps + 1)`.
///
/// Paths are held in memory as `f64`, so the cap bounds a simulation at
/// 400 MB.
pub const MAX_PATH_POINTS: usize = 50_000_000;

/// Default number of simulation paths.
pub const DEFAULT_PATHS: usize = 10_000;

/// Default number of time steps per path (daily steps for one year).
pub const DEFAULT_STEPS: usize = 252;

/// Default seed.
pub const DEFAULT_SEED: u64 = 120;

/// How the mean terminal payoff is turned into a price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Discounting {
    /// Multiply the mean payoff by `e^(-rT)`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "discounted"))]
    RiskNeutral,
    /// Report the raw mean terminal payoff.
    Undiscounted,
}

impl Discounting {
    /// Factor applied to the mean payoff.
    #[inline]
    pub fn factor(self, rate: f64, maturity: f64) -> f64 {
        match self {
            Discounting::RiskNeutral => (-rate * maturity).exp(),
            Discounting::Undiscounted => 1.0,
        }
    }

    /// Name used in text inputs.
    pub fn as_str(self) -> &'static str {
        match self {
            Discounting::RiskNeutral => "discounted",
            Discounting::Undiscounted => "undiscounted",
        }
    }
}

impl FromStr for Discounting {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discounted" | "risk_neutral" | "risk-neutral" => Ok(Discounting::RiskNeutral),
            "undiscounted" | "none" => Ok(Discounting::Undiscounted),
            other => Err(PricingError::invalid_parameter(
                "discounting",
                format!("expected 'discounted' or 'undiscounted', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Discounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monte Carlo simulation configuration.
///
/// Immutable once built. Use [`MonteCarloConfig::builder`] to construct.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{Discounting, MonteCarloConfig};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .n_steps(252)
///     .seed(12345)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.n_paths(), 50_000);
/// assert_eq!(config.discounting(), Discounting::RiskNeutral);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMonteCarloConfig"))]
pub struct MonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    discounting: Discounting,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
            discounting: Discounting::default(),
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the discounting convention.
    #[inline]
    pub fn discounting(&self) -> Discounting {
        self.discounting
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `n_steps` is 0 or greater than 10,000
    /// - `n_paths × (n_steps + 1)` exceeds [`MAX_PATH_POINTS`]
    pub fn validate(&self) -> Result<(), PricingError> {
        validate_grid(self.n_paths, self.n_steps)
    }
}

/// Unvalidated wire form; deserialization goes through the builder.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    #[serde(default)]
    discounting: Discounting,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMonteCarloConfig> for MonteCarloConfig {
    type Error = PricingError;

    fn try_from(raw: RawMonteCarloConfig) -> Result<Self, Self::Error> {
        MonteCarloConfig::builder()
            .n_paths(raw.n_paths)
            .n_steps(raw.n_steps)
            .seed(raw.seed)
            .discounting(raw.discounting)
            .build()
    }
}

/// Checks a simulation of `n_paths` paths with `n_steps` steps each.
pub(crate) fn validate_grid(n_paths: usize, n_steps: usize) -> Result<(), PricingError> {
    validate_paths(n_paths)?;
    if n_steps == 0 || n_steps > MAX_STEPS {
        return Err(PricingError::invalid_parameter(
            "n_steps",
            format!("must be in range [1, {}], got {}", MAX_STEPS, n_steps),
        ));
    }
    match n_paths.checked_mul(n_steps + 1) {
        Some(points) if points <= MAX_PATH_POINTS => Ok(()),
        _ => Err(PricingError::invalid_parameter(
            "n_paths",
            format!(
                "{} paths of {} steps exceed {} stored path values",
                n_paths, n_steps, MAX_PATH_POINTS
            ),
        )),
    }
}

fn validate_paths(n_paths: usize) -> Result<(), PricingError> {
    if n_paths == 0 || n_paths > MAX_PATHS {
        return Err(PricingError::invalid_parameter(
            "n_paths",
            format!("must be in range [1, {}], got {}", MAX_PATHS, n_paths),
        ));
    }
    Ok(())
}

/// Builder for [`MonteCarloConfig`].
///
/// Unset fields fall back to the defaults (10,000 paths, 252 steps,
/// seed 120, risk-neutral discounting). Validation happens at build time.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    discounting: Option<Discounting>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the discounting convention.
    #[inline]
    pub fn discounting(mut self, discounting: Discounting) -> Self {
        self.discounting = Some(discounting);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if validation fails.
    pub fn build(self) -> Result<MonteCarloConfig, PricingError> {
        let defaults = MonteCarloConfig::default();
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(defaults.n_paths),
            n_steps: self.n_steps.unwrap_or(defaults.n_steps),
            seed: self.seed.unwrap_or(defaults.seed),
            discounting: self.discounting.unwrap_or(defaults.discounting),
        };
        config.validate()?;
        Ok(config)
    }
}
