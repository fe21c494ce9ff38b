//! `tax-engine.toml` settings.
//!
//! Precedence, highest first:
//! 1. Command-line flags
//! 2. The config file (`--config`, else `tax-engine.toml` in the working
//!    directory when it exists)
//! 3. Built-in defaults: compiled-in rules, standard prices, latest year

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "tax-engine.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Year used when a command does not pass `--year`.
    pub default_tax_year: Option<i32>,
    /// Rules directory; the compiled-in tables are used when unset.
    pub rules_dir: Option<PathBuf>,
    /// Price list; falls back to `pricing.toml` in `rules_dir`, then to the
    /// standard prices.
    pub pricing_file: Option<PathBuf>,
    /// `EnvFilter` directive, e.g. `debug` or `tax_core=trace`.
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl CliConfig {
    pub fn parse(
        path: &Path,
        contents: &str,
    ) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Reads `path`, or the default file when `path` is `None`.
    ///
    /// An explicit path must exist. A missing default file yields the empty
    /// configuration. Relative paths inside the file are resolved against
    /// the file's directory.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&path, &contents)?;
        debug!(path = %path.display(), "loaded config file");

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Values set in `overrides` replace the ones in `self`.
    pub fn merge(
        self,
        overrides: CliConfig,
    ) -> Self {
        Self {
            default_tax_year: overrides.default_tax_year.or(self.default_tax_year),
            rules_dir: overrides.rules_dir.or(self.rules_dir),
            pricing_file: overrides.pricing_file.or(self.pricing_file),
            log_level: overrides.log_level.or(self.log_level),
            log_file: overrides.log_file.or(self.log_file),
        }
    }

    fn relative_to(
        self,
        base: &Path,
    ) -> Self {
        let resolve =
            |p: Option<PathBuf>| p.map(|p| if p.is_relative() { base.join(p) } else { p });
        Self {
            rules_dir: resolve(self.rules_dir),
            pricing_file: resolve(self.pricing_file),
            log_file: resolve(self.log_file),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_every_field() {
        let contents = r#"
default_tax_year = 2024
rules_dir = "/srv/rules"
pricing_file = "/srv/pricing.toml"
log_level = "debug"
log_file = "/var/log/tax-engine.log"
"#;

        let config = CliConfig::parse(Path::new("tax-engine.toml"), contents).unwrap();

        assert_eq!(
            config,
            CliConfig {
                default_tax_year: Some(2024),
                rules_dir: Some(PathBuf::from("/srv/rules")),
                pricing_file: Some(PathBuf::from("/srv/pricing.toml")),
                log_level: Some("debug".to_string()),
                log_file: Some(PathBuf::from("/var/log/tax-engine.log")),
            }
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = CliConfig::parse(Path::new("tax-engine.toml"), "database = \"taxes.db\"\n");

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn flags_override_file_values() {
        let file = CliConfig {
            default_tax_year: Some(2024),
            log_level: Some("info".to_string()),
            ..Default::default()
        };
        let flags = CliConfig {
            default_tax_year: Some(2025),
            ..Default::default()
        };

        let merged = file.merge(flags);

        assert_eq!(merged.default_tax_year, Some(2025));
        assert_eq!(merged.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = CliConfig::load(Some(&dir.path().join("missing.toml")));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tax-engine.toml");
        std::fs::write(&path, "rules_dir = \"rules\"\nlog_file = \"/tmp/tax.log\"\n").unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();

        assert_eq!(config.rules_dir, Some(dir.path().join("rules")));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/tax.log")));
    }
}
