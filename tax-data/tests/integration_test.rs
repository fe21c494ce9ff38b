//! Integration tests that load rules directories from disk.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{FilingStatus, PricingTable, TaxCalculationEngine, TaxRuleTable};
use tax_data::{PRICING_FILE, RulesLoader, RulesLoaderError, load_pricing};

fn shipped_rules_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../rules")
}

/// Copies the shipped rules into a scratch directory so a test can break them.
fn scratch_rules_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for entry in fs::read_dir(shipped_rules_dir()).expect("Failed to read rules dir") {
        let path = entry.unwrap().path();
        fs::copy(&path, dir.path().join(path.file_name().unwrap())).unwrap();
    }
    dir
}

#[test]
fn test_shipped_rules_match_builtin_table() {
    let table = RulesLoader::load_dir(&shipped_rules_dir()).expect("Failed to load rules");

    assert_eq!(table, TaxRuleTable::builtin());
}

#[test]
fn test_shipped_pricing_matches_standard_table() {
    let table = load_pricing(&shipped_rules_dir().join(PRICING_FILE)).expect("Failed to load");

    assert_eq!(table, PricingTable::standard());
}

#[test]
fn test_loaded_rules_drive_engine() {
    let table = RulesLoader::load_dir(&shipped_rules_dir()).unwrap();
    let engine = TaxCalculationEngine::new(&table);

    let tax = engine
        .federal_tax(dec!(50000), FilingStatus::Single, 2025)
        .unwrap();

    assert_eq!(tax, dec!(5914.00));
}

#[test]
fn test_missing_brackets_file() {
    let dir = scratch_rules_dir();
    fs::remove_file(dir.path().join("tax_brackets.csv")).unwrap();

    let result = RulesLoader::load_dir(dir.path());

    assert!(matches!(result, Err(RulesLoaderError::Io { .. })));
}

#[test]
fn test_directory_without_constants() {
    let dir = scratch_rules_dir();
    fs::remove_file(dir.path().join("tax_year_2024.toml")).unwrap();
    fs::remove_file(dir.path().join("tax_year_2025.toml")).unwrap();

    let result = RulesLoader::load_dir(dir.path());

    assert!(matches!(result, Err(RulesLoaderError::NoTaxYears(_))));
}

#[test]
fn test_year_without_constants_is_skipped() {
    let dir = scratch_rules_dir();
    fs::remove_file(dir.path().join("tax_year_2024.toml")).unwrap();

    let table = RulesLoader::load_dir(dir.path()).unwrap();

    assert_eq!(table.supported_years(), vec![2025]);
}

#[test]
fn test_inconsistent_base_tax_is_reported() {
    let dir = scratch_rules_dir();
    let path = dir.path().join("tax_brackets.csv");
    let csv = fs::read_to_string(&path)
        .unwrap()
        .replace("2025,Z,64850,103350,0.22,7442.00", "2025,Z,64850,103350,0.22,7400.00");
    fs::write(&path, csv).unwrap();

    let err = RulesLoader::load_dir(dir.path()).unwrap_err();

    match err {
        RulesLoaderError::InconsistentBaseTax {
            tax_year,
            schedule,
            computed,
            ..
        } => {
            assert_eq!(tax_year, 2025);
            assert_eq!(schedule, "Z");
            assert_eq!(computed, dec!(7442.00));
        }
        other => panic!("expected InconsistentBaseTax, got {other:?}"),
    }
}

#[test]
fn test_bad_constants_file_names_the_file() {
    let dir = scratch_rules_dir();
    let path = dir.path().join("tax_year_2025.toml");
    fs::write(&path, "tax_year = \"not a year\"\n").unwrap();

    let err = RulesLoader::load_dir(dir.path()).unwrap_err();

    let RulesLoaderError::TomlParse { file, .. } = err else {
        panic!("expected TomlParse, got {err:?}");
    };
    assert!(file.ends_with("tax_year_2025.toml"), "got: {file}");
}
