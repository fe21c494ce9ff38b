use anyhow::Context;
use clap::Parser;
use tracing::debug;

use tax_cli::{App, Cli, CliConfig, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?.merge(cli.overrides());
    logging::init_logging(config.log_level.as_deref(), config.log_file.as_deref())?;
    debug!(?config, "effective configuration");

    let app = App::from_config(&config)?;
    let output = app.run(&cli.command)?;

    let json = serde_json::to_string_pretty(&output).context("Failed to format output")?;
    println!("{json}");

    Ok(())
}
