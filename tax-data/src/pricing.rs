use std::path::Path;

use tax_core::PricingTable;
use tracing::debug;

use crate::RulesLoaderError;

/// Reads a price list such as:
///
/// ```toml
/// [individual-tax-return]
/// simple = "299"
/// moderate = "449"
/// complex = "599"
/// ```
///
/// Service names use the same kebab-case spelling as the CLI. Negative
/// prices and prices with cents are rejected.
pub fn parse_pricing(
    file: &str,
    contents: &str,
) -> Result<PricingTable, RulesLoaderError> {
    let table: PricingTable =
        toml::from_str(contents).map_err(|e| RulesLoaderError::toml(file, e))?;
    table.validate()?;
    debug!(file, services = table.services().count(), "loaded pricing table");
    Ok(table)
}

pub fn load_pricing(path: &Path) -> Result<PricingTable, RulesLoaderError> {
    let contents = std::fs::read_to_string(path).map_err(|e| RulesLoaderError::io(path, e))?;
    parse_pricing(&path.display().to_string(), &contents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{ComplexityTier, ServiceType, TaxError};

    use super::*;

    #[test]
    fn parses_partial_price_list() {
        let contents = r#"
[bookkeeping]
simple = "200"
complex = "600"
"#;

        let table = parse_pricing("pricing.toml", contents).unwrap();

        let prices = table.prices(ServiceType::Bookkeeping).unwrap();
        assert_eq!(prices.price(ComplexityTier::Complex), dec!(600));
        assert_eq!(prices.price(ComplexityTier::Moderate), dec!(200));
        assert_eq!(
            table.prices(ServiceType::TaxPlanning).err(),
            Some(TaxError::UnknownServiceType("tax-planning".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_service() {
        let contents = "[payroll]\nsimple = \"100\"\n";

        let result = parse_pricing("pricing.toml", contents);

        assert!(matches!(result, Err(RulesLoaderError::TomlParse { .. })));
    }

    #[test]
    fn rejects_negative_price() {
        let contents = "[consultation]\nsimple = \"-1\"\n";

        let result = parse_pricing("pricing.toml", contents);

        assert!(matches!(
            result,
            Err(RulesLoaderError::Rules(TaxError::InvalidInput { field: "price", .. }))
        ));
    }

    #[test]
    fn rejects_price_with_cents() {
        let contents = "[bookkeeping]\nsimple = \"99.50\"\n";

        let result = parse_pricing("pricing.toml", contents);

        assert!(matches!(
            result,
            Err(RulesLoaderError::Rules(TaxError::InvalidInput { field: "price", .. }))
        ));
    }
}
