use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::{
    FilingStatus, MileagePurpose, RetirementAccountType, ServiceIntakeDetails, ServiceType,
};

use crate::config::CliConfig;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Federal tax calculator and service price estimator.
///
/// Prints every result as JSON on stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "tax-engine", version, about)]
pub struct Cli {
    /// Config file (default: tax-engine.toml in the working directory, if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory with tax_brackets.csv and tax_year_<year>.toml files.
    #[arg(long, global = true)]
    pub rules_dir: Option<PathBuf>,

    /// Price list overriding the one in the rules directory.
    #[arg(long, global = true)]
    pub pricing_file: Option<PathBuf>,

    /// Tax year (default: the config's default_tax_year, else the latest loaded year).
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Log filter, e.g. `debug` or `warn,tax_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append logs to this file as well as stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Flags that take precedence over the config file.
    pub fn overrides(&self) -> CliConfig {
        CliConfig {
            default_tax_year: self.year,
            rules_dir: self.rules_dir.clone(),
            pricing_file: self.pricing_file.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Federal income tax on taxable income.
    FederalTax {
        #[arg(long, allow_negative_numbers = true)]
        income: Decimal,
        #[arg(long)]
        status: FilingStatus,
    },

    /// Child tax credit after the AGI phase-out.
    ChildCredit {
        #[arg(long)]
        children: u32,
        #[arg(long, allow_negative_numbers = true)]
        agi: Decimal,
        #[arg(long)]
        status: FilingStatus,
    },

    /// Standard mileage deduction.
    Mileage {
        #[arg(long, allow_negative_numbers = true)]
        miles: Decimal,
        /// business, medical or charitable
        #[arg(long, default_value = "business", value_parser = parse_purpose)]
        purpose: MileagePurpose,
    },

    /// Quarterly estimated payment.
    Quarterly {
        #[arg(long, allow_negative_numbers = true)]
        income: Decimal,
        #[arg(long)]
        status: FilingStatus,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        self_employment_income: Decimal,
    },

    /// Marginal rate, as a percentage, for the next dollar above `income`.
    MarginalRate {
        #[arg(long, allow_negative_numbers = true)]
        income: Decimal,
        #[arg(long)]
        status: FilingStatus,
    },

    /// Total tax as a percentage of total income.
    EffectiveRate {
        #[arg(long, allow_negative_numbers = true)]
        tax: Decimal,
        #[arg(long, allow_negative_numbers = true)]
        income: Decimal,
    },

    /// Standard deduction for a filing status.
    StandardDeduction {
        #[arg(long)]
        status: FilingStatus,
    },

    /// Annual contribution limit for a retirement account.
    RetirementLimit {
        /// 401k, ira, simple-ira or sep-ira
        #[arg(long, default_value = "401k", value_parser = parse_account)]
        account: RetirementAccountType,
        /// Age at year end; enables catch-up contributions.
        #[arg(long)]
        age: Option<u32>,
    },

    /// Full computation from a JSON file of taxpayer facts.
    Compute {
        /// JSON file with filingStatus, taxableIncome, adjustedGrossIncome, ...
        /// Use `-` to read stdin.
        facts: PathBuf,
    },

    /// Complexity tier for a service.
    Score {
        service: ServiceType,
        #[command(flatten)]
        intake: IntakeArgs,
    },

    /// Price quote. With `--tier` the tier is taken as given; otherwise it
    /// is scored from the intake flags.
    Quote {
        service: String,
        #[arg(long)]
        tier: Option<String>,
        #[command(flatten)]
        intake: IntakeArgs,
    },

    /// Tax years the loaded rules support.
    Years,
}

/// Intake questionnaire answers.
#[derive(Debug, Clone, Default, Args)]
pub struct IntakeArgs {
    #[arg(long)]
    pub self_employment: bool,
    #[arg(long)]
    pub rental_property: bool,
    #[arg(long)]
    pub investments: bool,
    /// Estimated annual income.
    #[arg(long)]
    pub estimated_income: Option<Decimal>,
    /// e.g. sole-prop, partnership, s-corp, c-corp
    #[arg(long)]
    pub business_type: Option<String>,
    /// Tier for services that are not scored from intake answers.
    #[arg(long)]
    pub complexity: Option<String>,
    #[arg(long)]
    pub urgent: bool,
}

impl IntakeArgs {
    pub fn to_details(&self) -> ServiceIntakeDetails {
        ServiceIntakeDetails {
            has_self_employment: self.self_employment,
            has_rental_property: self.rental_property,
            has_investments: self.investments,
            estimated_income: self.estimated_income,
            filing_status: None,
            business_type: self.business_type.clone(),
            urgent_service: self.urgent,
            complexity: self.complexity.clone(),
        }
    }
}

fn parse_purpose(s: &str) -> Result<MileagePurpose, String> {
    MileagePurpose::parse(s).ok_or_else(|| format!("unknown mileage purpose '{s}'"))
}

fn parse_account(s: &str) -> Result<RetirementAccountType, String> {
    RetirementAccountType::parse(s).ok_or_else(|| format!("unknown retirement account '{s}'"))
}
