use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{ComplexityTier, ServiceType};
use crate::TaxError;

/// Base prices for one service.
///
/// `simple` is mandatory; a missing higher tier is priced as `simple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierPrices {
    pub simple: Decimal,
    #[serde(default)]
    pub moderate: Option<Decimal>,
    #[serde(default)]
    pub complex: Option<Decimal>,
}

impl TierPrices {
    pub fn new(
        simple: Decimal,
        moderate: Decimal,
        complex: Decimal,
    ) -> Self {
        Self {
            simple,
            moderate: Some(moderate),
            complex: Some(complex),
        }
    }

    pub fn price(
        &self,
        tier: ComplexityTier,
    ) -> Decimal {
        match tier {
            ComplexityTier::Simple => self.simple,
            ComplexityTier::Moderate => self.moderate.unwrap_or(self.simple),
            ComplexityTier::Complex => self.complex.unwrap_or(self.simple),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingTable {
    services: BTreeMap<ServiceType, TierPrices>,
}

impl PricingTable {
    pub fn new(services: BTreeMap<ServiceType, TierPrices>) -> Result<Self, TaxError> {
        let table = Self { services };
        table.validate()?;
        Ok(table)
    }

    /// Published price list.
    pub fn standard() -> Self {
        let services = BTreeMap::from([
            (
                ServiceType::IndividualTaxReturn,
                TierPrices::new(dec!(299), dec!(449), dec!(599)),
            ),
            (
                ServiceType::BusinessTaxReturn,
                TierPrices::new(dec!(799), dec!(1299), dec!(1999)),
            ),
            (
                ServiceType::TaxPlanning,
                TierPrices::new(dec!(399), dec!(699), dec!(999)),
            ),
            (
                ServiceType::Bookkeeping,
                TierPrices::new(dec!(249), dec!(449), dec!(749)),
            ),
            (
                ServiceType::DebtResolution,
                TierPrices::new(dec!(999), dec!(1999), dec!(3499)),
            ),
            (
                ServiceType::Consultation,
                TierPrices::new(dec!(0), dec!(0), dec!(0)),
            ),
        ]);
        Self { services }
    }

    /// Rejects negative prices and prices with cents.
    ///
    /// Whole-dollar bases keep a rush total equal to the rounded standard
    /// total times the rush multiplier.
    pub fn validate(&self) -> Result<(), TaxError> {
        for (service, prices) in &self.services {
            for price in [Some(prices.simple), prices.moderate, prices.complex]
                .into_iter()
                .flatten()
            {
                if price < Decimal::ZERO {
                    return Err(TaxError::InvalidInput {
                        field: "price",
                        reason: format!("{service} has a negative price"),
                    });
                }
                if !price.fract().is_zero() {
                    return Err(TaxError::InvalidInput {
                        field: "price",
                        reason: format!("{service} price {price} is not a whole dollar amount"),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn prices(
        &self,
        service: ServiceType,
    ) -> Result<&TierPrices, TaxError> {
        self.services
            .get(&service)
            .ok_or_else(|| TaxError::UnknownServiceType(service.to_string()))
    }

    pub fn services(&self) -> impl Iterator<Item = ServiceType> + '_ {
        self.services.keys().copied()
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn standard_table_covers_every_service() {
        let table = PricingTable::standard();

        assert_eq!(table.services().collect::<Vec<_>>(), ServiceType::ALL.to_vec());
    }

    #[test]
    fn missing_tier_falls_back_to_simple() {
        let prices = TierPrices {
            simple: dec!(100),
            moderate: None,
            complex: Some(dec!(300)),
        };

        assert_eq!(prices.price(ComplexityTier::Moderate), dec!(100));
        assert_eq!(prices.price(ComplexityTier::Complex), dec!(300));
    }

    #[test]
    fn missing_service_is_unknown() {
        let table = PricingTable::new(BTreeMap::from([(
            ServiceType::Consultation,
            TierPrices::new(dec!(0), dec!(0), dec!(0)),
        )]))
        .unwrap();

        assert_eq!(
            table.prices(ServiceType::Bookkeeping),
            Err(TaxError::UnknownServiceType("bookkeeping".to_string()))
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = PricingTable::new(BTreeMap::from([(
            ServiceType::Bookkeeping,
            TierPrices::new(dec!(100), dec!(-1), dec!(300)),
        )]));

        assert!(matches!(result, Err(TaxError::InvalidInput { .. })));
    }

    #[test]
    fn price_with_cents_is_rejected() {
        let result = PricingTable::new(BTreeMap::from([(
            ServiceType::Bookkeeping,
            TierPrices::new(dec!(99.5), dec!(449), dec!(749)),
        )]));

        assert_eq!(
            result,
            Err(TaxError::InvalidInput {
                field: "price",
                reason: "bookkeeping price 99.5 is not a whole dollar amount".to_string(),
            })
        );
    }

    #[test]
    fn trailing_zero_cents_are_whole_dollars() {
        let result = PricingTable::new(BTreeMap::from([(
            ServiceType::Bookkeeping,
            TierPrices::new(dec!(250.00), dec!(449), dec!(749)),
        )]));

        assert!(result.is_ok());
    }

    #[test]
    fn deserializes_from_service_keyed_map() {
        let json = r#"{
            "bookkeeping": { "simple": "150" },
            "consultation": { "simple": "0", "moderate": "0", "complex": "0" }
        }"#;

        let table: PricingTable = serde_json::from_str(json).unwrap();

        assert_eq!(
            table.prices(ServiceType::Bookkeeping).unwrap().price(ComplexityTier::Complex),
            dec!(150)
        );
    }
}
