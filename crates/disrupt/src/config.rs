//! User configuration stored in `config.yaml`
//!
//! Every field is optional; command-line flags override file values.
//!
//! ```yaml
//! scenario: collapse
//! seed: 7
//! paths: 500
//! format: table
//! snapshot: aggregated
//! extra_variables:
//!   - key: housingAffordability
//!     label: Housing Affordability
//!     base: 100
//!     drift: -1.2
//!     vol: 5
//!     floor: 10
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use disrupt_core::model::{DEFAULT_NUM_PATHS, DEFAULT_NUM_YEARS};
use disrupt_core::{ConfigError, Scenario, SimulationRequest, SnapshotMode, VariableConfig, registry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scenario: Scenario,
    pub seed: u32,
    pub paths: usize,
    pub years: u32,
    pub format: OutputFormat,
    pub snapshot: SnapshotMode,
    /// User-defined variables, simulated alongside the built-in registries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_variables: Vec<VariableConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Base,
            seed: 42,
            paths: DEFAULT_NUM_PATHS,
            years: DEFAULT_NUM_YEARS,
            format: OutputFormat::Table,
            snapshot: SnapshotMode::Aggregated,
            extra_variables: Vec::new(),
        }
    }
}

/// Error types for configuration loading
#[derive(Debug)]
pub enum ConfigFileError {
    Io(String),
    Parse(String),
    Invalid(ConfigError),
    DuplicateKey(String),
}

impl fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFileError::Io(msg) => write!(f, "IO error: {msg}"),
            ConfigFileError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConfigFileError::Invalid(e) => write!(f, "Invalid variable: {e}"),
            ConfigFileError::DuplicateKey(key) => {
                write!(f, "Variable key {key:?} is already defined")
            }
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigFileError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl AppConfig {
    /// `~/.disrupt/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".disrupt").join("config.yaml"))
    }

    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Load and validate the config.
    ///
    /// An explicit path must exist. Without one the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigFileError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigFileError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| ConfigFileError::Parse(format!("{}: {e}", path.display())))?;
        config.validate()?;

        tracing::info!(
            path = %path.display(),
            extra_variables = config.extra_variables.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Extra variables must satisfy the config invariants and must not
    /// shadow a built-in or each other.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        for (i, cfg) in self.extra_variables.iter().enumerate() {
            cfg.validate().map_err(ConfigFileError::Invalid)?;
            let duplicate = registry::find(&cfg.key).is_some()
                || self.extra_variables[..i].iter().any(|c| c.key == cfg.key);
            if duplicate {
                return Err(ConfigFileError::DuplicateKey(cfg.key.to_string()));
            }
        }
        Ok(())
    }

    /// Built-in variable or user-defined extra with this key
    pub fn find_variable(&self, key: &str) -> Option<&VariableConfig> {
        registry::find(key).or_else(|| self.extra_variables.iter().find(|c| c.key == key))
    }

    pub fn request(&self) -> SimulationRequest {
        SimulationRequest::new(self.paths, self.years, self.seed, self.scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = AppConfig::from_yaml("scenario: collapse\nseed: 7\n").unwrap();
        assert_eq!(config.scenario, Scenario::Collapse);
        assert_eq!(config.seed, 7);
        assert_eq!(config.paths, DEFAULT_NUM_PATHS);
        assert_eq!(config.snapshot, SnapshotMode::Aggregated);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AppConfig {
            scenario: Scenario::Regulated,
            format: OutputFormat::Json,
            snapshot: SnapshotMode::Placeholder,
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(AppConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_extra_variable_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "extra_variables:\n  - key: housing\n    label: Housing\n    base: 100\n    drift: -1.2\n    vol: 5\n    floor: 10"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        let housing = config.find_variable("housing").unwrap();
        assert_eq!(housing.floor, Some(10.0));
        assert_eq!(housing.cap, None);
        assert!(config.find_variable("gold").is_some());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigFileError::Io(_)));
    }

    #[test]
    fn test_invalid_extra_variable_rejected() {
        let config = AppConfig {
            extra_variables: vec![VariableConfig::new("x", "X", 10.0, 0.0, 1.0)
                .with_floor(50.0)
                .with_cap(20.0)],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::Invalid(ConfigError::FloorAboveCap { .. }))
        ));
    }

    #[test]
    fn test_extra_variable_cannot_shadow_builtin() {
        let config = AppConfig {
            extra_variables: vec![VariableConfig::new("crypto", "Mine", 100.0, 0.0, 1.0)],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::DuplicateKey(key)) if key == "crypto"
        ));
    }
}
