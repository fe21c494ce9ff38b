//! Service pricing.
//!
//! Individual and business returns derive their tier from intake answers;
//! every other service takes the tier the caller asked for. Quotes are
//! `base × 1.5` for rush work, rounded half-up to whole dollars, and
//! consultations are always free.

pub mod complexity;
pub mod table;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::round_whole_dollars;
use crate::models::{ComplexityTier, ServiceComplexityQuote, ServiceIntakeDetails, ServiceType};
use crate::TaxError;

pub use table::{PricingTable, TierPrices};

pub const RUSH_MULTIPLIER: Decimal = dec!(1.5);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingEngine {
    table: PricingTable,
}

impl PricingEngine {
    pub fn new(table: PricingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    /// Complexity tier for `service` given the intake answers.
    pub fn score_complexity(
        &self,
        service: ServiceType,
        details: &ServiceIntakeDetails,
    ) -> ComplexityTier {
        match service {
            ServiceType::IndividualTaxReturn => complexity::individual_return_tier(details),
            ServiceType::BusinessTaxReturn => complexity::business_return_tier(details),
            ServiceType::TaxPlanning
            | ServiceType::Bookkeeping
            | ServiceType::DebtResolution
            | ServiceType::Consultation => details
                .complexity
                .as_deref()
                .map(ComplexityTier::parse_lenient)
                .unwrap_or_default(),
        }
    }

    /// Price for `service` at `tier`.
    ///
    /// # Errors
    /// [`TaxError::UnknownServiceType`] when the pricing table has no entry
    /// for `service`.
    pub fn quote(
        &self,
        service: ServiceType,
        tier: ComplexityTier,
        urgent_service: bool,
    ) -> Result<ServiceComplexityQuote, TaxError> {
        let base_amount = self.table.prices(service)?.price(tier);

        let (rush_surcharge, total_amount) = if service.is_free() {
            (Decimal::ZERO, Decimal::ZERO)
        } else if urgent_service {
            (
                base_amount * (RUSH_MULTIPLIER - Decimal::ONE),
                round_whole_dollars(base_amount * RUSH_MULTIPLIER),
            )
        } else {
            (Decimal::ZERO, round_whole_dollars(base_amount))
        };

        let rush = if urgent_service { ", rush" } else { "" };
        let description = format!("{} ({tier}{rush})", service.label());

        debug!(%service, %tier, urgent_service, %total_amount, "quoted service");
        Ok(ServiceComplexityQuote {
            service_type: service,
            complexity_tier: tier,
            base_amount,
            rush_surcharge,
            total_amount,
            description,
        })
    }

    /// String-keyed [`PricingEngine::quote`]. An unknown service is an
    /// error; an unknown tier is priced as simple.
    pub fn quote_by_name(
        &self,
        service: &str,
        tier: &str,
        urgent_service: bool,
    ) -> Result<ServiceComplexityQuote, TaxError> {
        let service: ServiceType = service.parse()?;
        self.quote(service, ComplexityTier::parse_lenient(tier), urgent_service)
    }

    /// Scores the intake and quotes it, honouring `details.urgent_service`.
    pub fn price_intake(
        &self,
        service: ServiceType,
        details: &ServiceIntakeDetails,
    ) -> Result<ServiceComplexityQuote, TaxError> {
        let tier = self.score_complexity(service, details);
        self.quote(service, tier, details.urgent_service)
    }
}
