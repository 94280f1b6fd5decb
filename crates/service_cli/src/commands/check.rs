//! Configuration check command

use tracing::info;

use crate::config::PricerConfig;
use crate::output::Table;
use crate::Result;

/// Run the check command
pub fn run(config: &PricerConfig) -> Result<()> {
    info!("Checking configuration...");
    print!("{}", render(config));
    info!("Configuration OK");
    Ok(())
}

fn render(config: &PricerConfig) -> String {
    let source = config
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in defaults)".to_string());
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "(unset)".to_string());

    let mut table = Table::new("Pricer Configuration");
    table
        .row("Config file", source)
        .row("Log level", config.logging.level.to_string())
        .row("RUST_LOG", rust_log)
        .row("MC paths", config.monte_carlo.n_paths.to_string())
        .row("MC steps", config.monte_carlo.n_steps.to_string())
        .row("MC seed", config.monte_carlo.seed.to_string())
        .row("MC discounting", config.monte_carlo.discounting.to_string())
        .row("Lattice periods", config.lattice.n_periods.to_string())
        .row("Lattice style", config.lattice.style.to_string());
    table.render()
}
