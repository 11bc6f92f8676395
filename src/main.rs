mod run;

use anyhow::{Context, Result};
use budgetwise::config::Config;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = Config::load().context("Failed to load configuration")?;
    log::debug!("Using currency symbol {}", config.currency_symbol);

    run::as_cli(&args, &config)
}
