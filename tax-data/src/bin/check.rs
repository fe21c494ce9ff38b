use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_data::{PRICING_FILE, RulesLoader, load_pricing};
use tracing_subscriber::EnvFilter;

/// Validate a rules directory.
///
/// Loads `tax_brackets.csv`, every `tax_year_<year>.toml` and, when present,
/// `pricing.toml`, then prints what was found. Exits non-zero on the first
/// problem.
#[derive(Parser, Debug)]
#[command(name = "tax-rules-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the rule files
    #[arg(short, long, default_value = "rules")]
    dir: PathBuf,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("Checking rules in: {}", args.dir.display());

    let table = RulesLoader::load_dir(&args.dir)
        .with_context(|| format!("Failed to load rules from: {}", args.dir.display()))?;

    for year in table.supported_years() {
        let rules = table.get_rules(year)?;
        println!(
            "  {year}: standard deduction {} (single), top rate {}",
            rules.standard_deduction.single,
            rules.brackets.single.top_rate()
        );
    }

    let pricing_path = args.dir.join(PRICING_FILE);
    if pricing_path.exists() {
        let pricing = load_pricing(&pricing_path)
            .with_context(|| format!("Failed to load pricing: {}", pricing_path.display()))?;
        println!("  pricing: {} services", pricing.services().count());
    }

    println!("Rules are valid.");
    Ok(())
}
