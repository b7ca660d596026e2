//! `igethouse.toml` loading.
//!
//! Every section and field is optional; anything left out keeps its default.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "igethouse.db"
//!
//! [wizard]
//! housing_share = "0.33"
//! auto_advance_on_payment_method = true
//!
//! [fees]
//! agent_rate = "0.05"
//!
//! [logging]
//! level = "debug"
//! file = "igethouse.log"
//! ```

use std::path::{Path, PathBuf};

use house_core::WizardConfig;
use house_core::calculations::FeeSchedule;
use house_core::storage::StoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "igethouse.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Log output settings. `RUST_LOG` applies when `level` is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `debug` or `house_core=trace`.
    pub level: Option<String>,

    /// File that receives a copy of every log line.
    pub file: Option<PathBuf>,

    /// Hide log lines on the console.
    pub quiet: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    pub store: StoreConfig,
    pub wizard: WizardConfig,
    pub fees: FeeSchedule,
    pub logging: LoggingConfig,
}

impl HouseConfig {
    pub fn from_toml(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text, path)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads `explicit` when given. Otherwise loads [`DEFAULT_CONFIG_FILE`]
    /// if it exists, else returns the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::load(fallback);
        }
        tracing::debug!("no config file; using defaults");
        Ok(Self::default())
    }

    /// Command-line flags win over the file.
    pub fn with_overrides(
        mut self,
        backend: Option<String>,
        connection_string: Option<String>,
    ) -> Self {
        if let Some(backend) = backend {
            self.store.backend = backend;
        }
        if let Some(conn) = connection_string {
            self.store.connection_string = conn;
        }
        self
    }

    /// Logging flags win over the `[logging]` section. `--quiet` can only
    /// silence the console, not re-enable it.
    pub fn with_log_flags(
        mut self,
        level: Option<String>,
        file: Option<PathBuf>,
        quiet: bool,
    ) -> Self {
        if level.is_some() {
            self.logging.level = level;
        }
        if file.is_some() {
            self.logging.file = file;
        }
        self.logging.quiet |= quiet;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = HouseConfig::from_toml("", Path::new("igethouse.toml")).unwrap();

        assert_eq!(config, HouseConfig::default());
        assert_eq!(config.store.backend, "sqlite");
    }

    #[test]
    fn sections_override_only_named_fields() {
        let text = r#"
            [store]
            backend = "memory"

            [wizard]
            housing_share = "0.4"
            auto_advance_on_payment_method = true
            default_lifestyle = "moderate"

            [fees]
            agent_rate = "0.05"
        "#;

        let config = HouseConfig::from_toml(text, Path::new("x.toml")).unwrap();

        assert_eq!(config.store.backend, "memory");
        assert_eq!(config.store.connection_string, "igethouse.db");
        assert_eq!(config.wizard.housing_share, dec!(0.4));
        assert!(config.wizard.auto_advance_on_payment_method);
        assert_eq!(config.wizard.default_lifestyle.as_deref(), Some("moderate"));
        assert_eq!(config.wizard.mortgage_years, 30);
        assert_eq!(config.fees.agent_rate, dec!(0.05));
        assert_eq!(config.fees.legal_rate, dec!(0.05));
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = HouseConfig::from_toml("[store", Path::new("broken.toml")).unwrap_err();

        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("igethouse.toml");
        std::fs::write(&path, "[wizard]\nmortgage_years = 20\n").unwrap();

        let config = HouseConfig::load(&path).unwrap();

        assert_eq!(config.wizard.mortgage_years, 20);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = HouseConfig::resolve(Some(Path::new("/nonexistent/igethouse.toml")));

        assert!(matches!(err, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn flags_override_store_settings() {
        let config = HouseConfig::default()
            .with_overrides(Some("memory".into()), None)
            .with_overrides(None, Some(":memory:".into()));

        assert_eq!(config.store.backend, "memory");
        assert_eq!(config.store.connection_string, ":memory:");
    }

    #[test]
    fn logging_section_and_flags() {
        let text = "[logging]\nlevel = \"warn\"\nquiet = true\n";
        let config = HouseConfig::from_toml(text, Path::new("x.toml"))
            .unwrap()
            .with_log_flags(Some("debug".into()), Some(PathBuf::from("run.log")), false);

        assert_eq!(
            config.logging,
            LoggingConfig {
                level: Some("debug".to_string()),
                file: Some(PathBuf::from("run.log")),
                quiet: true,
            }
        );
    }

    #[test]
    fn read_error_keeps_io_source() {
        let err = HouseConfig::load(Path::new("/nonexistent/igethouse.toml")).unwrap_err();

        assert_eq!(err.to_string(), "cannot read config file '/nonexistent/igethouse.toml'");
        assert!(std::error::Error::source(&err).is_some());
    }
}
