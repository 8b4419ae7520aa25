//! Rule set loading functionality.
//!
//! Loads a [`RuleSet`] from a directory of YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ClassificationsConfig, PenaltyConfig, RateTable, RuleSet, RuleSetMetadata,
};

/// Loads a rule set from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/sample/
/// ├── ruleset.yaml          # Rule set metadata
/// ├── classifications.yaml  # Employee classifications
/// ├── penalties.yaml        # Penalty and overtime tables
/// └── rates/
///     └── 2025-07-01.yaml   # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use pay_engine::config::RuleSetLoader;
///
/// let rules = RuleSetLoader::load("./config/sample").unwrap();
/// println!("Loaded rule set: {}", rules.metadata().name);
/// ```
#[derive(Debug)]
pub struct RuleSetLoader;

impl RuleSetLoader {
    /// Loads a [`RuleSet`] from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when a required file or the
    /// rates directory is missing, or [`EngineError::ConfigParseError`] when
    /// a file contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<RuleSet> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RuleSetMetadata>(&path.join("ruleset.yaml"))?;

        let classifications_config =
            Self::load_yaml::<ClassificationsConfig>(&path.join("classifications.yaml"))?;

        let penalty_config = Self::load_yaml::<PenaltyConfig>(&path.join("penalties.yaml"))?;

        let rates = Self::load_rates(&path.join("rates"))?;

        Ok(RuleSet::new(
            metadata,
            classifications_config.classifications,
            rates,
            penalty_config.penalties,
            penalty_config.overtime,
        ))
    }

    /// Loads and parses a single YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every rate table from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateTable>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{rates_dir_str}/*.yaml"),
            });
        }

        Ok(rates)
    }
}
