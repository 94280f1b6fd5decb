//! CLI configuration management
//!
//! Handles loading configuration from a TOML file and environment variables.
//! Command-line flags are applied last by the individual commands.
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [monte_carlo]
//! n_paths = 10000
//! n_steps = 252
//! seed = 120
//! discounting = "discounted"
//!
//! [lattice]
//! n_periods = 200
//! style = "european"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::ExerciseStyle;
use pricer_models::lattice::MAX_PERIODS;
use pricer_pricing::mc::{Discounting, MonteCarloConfig, DEFAULT_PATHS, DEFAULT_SEED, DEFAULT_STEPS};
use pricer_pricing::request::DEFAULT_LATTICE_PERIODS;
use serde::Deserialize;
use thiserror::Error;

/// Configuration file looked up in the working directory when `--config`
/// is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pricer.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn parse_field<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[logging]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(deserialize_with = "parse_field")]
    pub level: LogLevel,
}

/// `[monte_carlo]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonteCarloSection {
    /// Number of simulated paths
    pub n_paths: usize,
    /// Time steps per path
    pub n_steps: usize,
    /// Generator seed
    pub seed: u64,
    /// `discounted` or `undiscounted`
    #[serde(deserialize_with = "parse_field")]
    pub discounting: Discounting,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
            discounting: Discounting::default(),
        }
    }
}

/// `[lattice]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeSection {
    /// Number of lattice periods
    pub n_periods: usize,
    /// `european` or `american`
    #[serde(deserialize_with = "parse_field")]
    pub style: ExerciseStyle,
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            n_periods: DEFAULT_LATTICE_PERIODS,
            style: ExerciseStyle::default(),
        }
    }
}

/// Effective CLI configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricerConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Monte Carlo defaults
    pub monte_carlo: MonteCarloSection,
    /// Lattice defaults
    pub lattice: LatticeSection,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PricerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PricerConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (`PRICER_LOG_LEVEL`, `PRICER_SEED`)
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            self.logging.level = LogLevel::from_str(&level)?;
        }

        if let Some(seed) = lookup("PRICER_SEED") {
            self.monte_carlo.seed = seed.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("PRICER_SEED must be an unsigned integer, got '{}'", seed))
            })?;
        }

        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monte_carlo_config().map_err(|e| ConfigError::InvalidValue {
            key: "monte_carlo",
            reason: e.to_string(),
        })?;

        if self.lattice.n_periods == 0 || self.lattice.n_periods > MAX_PERIODS {
            return Err(ConfigError::InvalidValue {
                key: "lattice.n_periods",
                reason: format!("must be in range [1, {}]", MAX_PERIODS),
            });
        }

        Ok(())
    }

    /// Monte Carlo configuration built from the `[monte_carlo]` section
    pub fn monte_carlo_config(&self) -> Result<MonteCarloConfig, pricer_core::types::PricingError> {
        MonteCarloConfig::builder()
            .n_paths(self.monte_carlo.n_paths)
            .n_steps(self.monte_carlo.n_steps)
            .seed(self.monte_carlo.seed)
            .discounting(self.monte_carlo.discounting)
            .build()
    }
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Environment variables
/// 2. Config file (`--config`, else `pricer.toml` if present)
/// 3. Default values
///
/// Command-line flags are applied on top by each command.
pub fn load(explicit: Option<&Path>) -> Result<PricerConfig, ConfigError> {
    let mut config = match explicit {
        Some(path) => PricerConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                PricerConfig::from_file(default_path)?
            } else {
                PricerConfig::default()
            }
        }
    };

    config.apply_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PricerConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.monte_carlo.n_paths, 10_000);
        assert_eq!(config.monte_carlo.n_steps, 252);
        assert_eq!(config.monte_carlo.seed, 120);
        assert_eq!(config.monte_carlo.discounting, Discounting::RiskNeutral);
        assert_eq!(config.lattice.n_periods, 200);
        assert_eq!(config.lattice.style, ExerciseStyle::European);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            [logging]
            level = "debug"

            [monte_carlo]
            n_paths = 5000
            n_steps = 52
            seed = 7
            discounting = "undiscounted"

            [lattice]
            n_periods = 400
            style = "american"
        "#;

        let config = PricerConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.monte_carlo.n_paths, 5000);
        assert_eq!(config.monte_carlo.n_steps, 52);
        assert_eq!(config.monte_carlo.seed, 7);
        assert_eq!(config.monte_carlo.discounting, Discounting::Undiscounted);
        assert_eq!(config.lattice.n_periods, 400);
        assert_eq!(config.lattice.style, ExerciseStyle::American);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = PricerConfig::from_toml_str("[monte_carlo]\nseed = 99\n").unwrap();
        assert_eq!(config.monte_carlo.seed, 99);
        assert_eq!(config.monte_carlo.n_paths, 10_000);
        assert_eq!(config.lattice.n_periods, 200);
    }

    #[test]
    fn test_invalid_toml_values() {
        assert!(PricerConfig::from_toml_str("[lattice]\nstyle = \"bermudan\"\n").is_err());
        assert!(PricerConfig::from_toml_str("[lattice]\nn_periods = 0\n").is_err());
        assert!(PricerConfig::from_toml_str("[lattice]\nn_periods = 5001\n").is_err());
        assert!(PricerConfig::from_toml_str("[lattice]\nn_periods = 5000\n").is_ok());
        assert!(PricerConfig::from_toml_str(
            "[monte_carlo]\nn_paths = 10000000\nn_steps = 252\n"
        )
        .is_err());
        assert!(PricerConfig::from_toml_str("[monte_carlo]\nn_paths = 0\n").is_err());
        assert!(PricerConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").is_err());
        assert!(PricerConfig::from_toml_str("[unknown]\nkey = 1\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            [("PRICER_LOG_LEVEL", "warn"), ("PRICER_SEED", "2024")].into();
        let mut config = PricerConfig::default();
        config
            .apply_env_with(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.monte_carlo.seed, 2024);
    }

    #[test]
    fn test_env_bad_seed() {
        let mut config = PricerConfig::default();
        let result = config.apply_env_with(|key| {
            (key == "PRICER_SEED").then(|| "not-a-number".to_string())
        });
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_from_file_records_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lattice]\nn_periods = 50").unwrap();

        let config = PricerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.lattice.n_periods, 50);
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = load(Some(Path::new("/definitely/not/here/pricer.toml")));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_monte_carlo_config_from_section() {
        let config = PricerConfig::default();
        let mc = config.monte_carlo_config().unwrap();
        assert_eq!(mc.seed(), 120);
        assert_eq!(mc.n_paths(), 10_000);
    }
}
