//! Builds the engines from configuration and runs one command.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tax_core::{PricingEngine, PricingTable, TaxCalculationEngine, TaxRuleTable, TaxpayerFacts};
use tax_data::{PRICING_FILE, RulesLoader, load_pricing};
use tracing::{debug, info};

use crate::cli::Command;
use crate::config::CliConfig;

/// Loaded rules, prices and the tax year commands run against.
#[derive(Debug)]
pub struct App {
    rules: TaxRuleTable,
    pricing: PricingEngine,
    tax_year: i32,
}

impl App {
    pub fn new(
        rules: TaxRuleTable,
        pricing: PricingTable,
        tax_year: Option<i32>,
    ) -> Result<Self> {
        let tax_year = match tax_year.or_else(|| rules.latest_year()) {
            Some(year) => year,
            None => anyhow::bail!("no tax years are loaded"),
        };
        Ok(Self {
            rules,
            pricing: PricingEngine::new(pricing),
            tax_year,
        })
    }

    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let rules = match &config.rules_dir {
            Some(dir) => RulesLoader::load_dir(dir)
                .with_context(|| format!("Failed to load rules from: {}", dir.display()))?,
            None => {
                debug!("no rules directory configured; using built-in rules");
                TaxRuleTable::builtin()
            }
        };

        let pricing_path = config.pricing_file.clone().or_else(|| {
            config
                .rules_dir
                .as_ref()
                .map(|dir| dir.join(PRICING_FILE))
                .filter(|path| path.exists())
        });
        let pricing = match pricing_path {
            Some(path) => load_pricing(&path)
                .with_context(|| format!("Failed to load pricing: {}", path.display()))?,
            None => PricingTable::standard(),
        };

        let app = Self::new(rules, pricing, config.default_tax_year)?;
        info!(tax_year = app.tax_year, "tax engine ready");
        Ok(app)
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn engine(&self) -> TaxCalculationEngine<'_> {
        TaxCalculationEngine::new(&self.rules)
    }

    /// Runs `command` and returns its JSON result.
    pub fn run(
        &self,
        command: &Command,
    ) -> Result<Value> {
        let engine = self.engine();
        let year = self.tax_year;

        let output = match command {
            Command::FederalTax { income, status } => json!({
                "taxYear": year,
                "filingStatus": status,
                "taxableIncome": income,
                "federalTax": engine.federal_tax(*income, *status, year)?,
            }),
            Command::ChildCredit {
                children,
                agi,
                status,
            } => serde_json::to_value(engine.child_tax_credit(*children, *agi, *status, year)?)?,
            Command::Mileage { miles, purpose } => json!({
                "taxYear": year,
                "purpose": purpose,
                "miles": miles,
                "deduction": engine.mileage_deduction_for(*purpose, *miles, year)?,
            }),
            Command::Quarterly {
                income,
                status,
                self_employment_income,
            } => {
                let payment = engine.quarterly_estimated_tax(
                    *income,
                    *status,
                    year,
                    *self_employment_income,
                )?;
                json!({ "taxYear": year, "quarterlyPayment": payment })
            }
            Command::MarginalRate { income, status } => json!({
                "taxYear": year,
                "marginalRate": engine.marginal_tax_rate(*income, *status, year)?,
            }),
            Command::EffectiveRate { tax, income } => json!({
                "effectiveRate": TaxCalculationEngine::effective_tax_rate(*tax, *income)?,
            }),
            Command::StandardDeduction { status } => json!({
                "taxYear": year,
                "filingStatus": status,
                "standardDeduction": engine.standard_deduction(*status, year)?,
            }),
            Command::RetirementLimit { account, age } => json!({
                "taxYear": year,
                "account": account,
                "limit": engine.retirement_contribution_limit(*account, *age, year)?,
            }),
            Command::Compute { facts } => {
                let facts = read_facts(facts)?;
                serde_json::to_value(engine.compute(year, &facts)?)?
            }
            Command::Score { service, intake } => json!({
                "serviceType": service,
                "complexityTier": self.pricing.score_complexity(*service, &intake.to_details()),
            }),
            Command::Quote {
                service,
                tier,
                intake,
            } => {
                let quote = match tier {
                    Some(tier) => self.pricing.quote_by_name(service, tier, intake.urgent)?,
                    None => self
                        .pricing
                        .price_intake(service.parse()?, &intake.to_details())?,
                };
                serde_json::to_value(quote)?
            }
            Command::Years => json!({
                "supportedYears": self.rules.supported_years(),
                "defaultYear": year,
            }),
        };

        Ok(output)
    }
}

/// Reads taxpayer facts JSON from `path`, or from stdin when `path` is `-`.
fn read_facts(path: &Path) -> Result<TaxpayerFacts> {
    let contents = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read facts from stdin")?;
        if buffer.trim().is_empty() {
            anyhow::bail!("No input received. Provide a facts file or pipe JSON to stdin.");
        }
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read facts: {}", path.display()))?
    };
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse facts: {}", path.display()))
}
