use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::helper::json::FromJsonString;
use crate::helper::run_helper::DepthThresholds;

pub const DEFAULT_CONSENSUS_COVERAGE: u32 = 1000;
pub const DEFAULT_OK_COVERAGE: u32 = 100;
pub const DEFAULT_PX_PER_COLUMN: u32 = 3;

/// Run-wide settings shared by every sample: the reference panel samples are
/// scored against and the depth thresholds of the coverage strip.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(default)]
    pub reference_panel: Vec<ReferenceDescriptor>,

    #[serde(
        default = "default_consensus_coverage",
        deserialize_with = "string_or_number_to_u32"
    )]
    pub consensus_coverage: u32,

    #[serde(
        default = "default_ok_coverage",
        deserialize_with = "string_or_number_to_u32"
    )]
    pub ok_coverage: u32,

    #[serde(
        default = "default_px_per_column",
        deserialize_with = "string_or_number_to_u32"
    )]
    pub px_per_column: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReferenceDescriptor {
    pub name: String,
    /// description, length and anything else the panel file carries
    #[serde(flatten)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ReferenceDescriptor {
    pub fn new(name: &str) -> Self {
        ReferenceDescriptor {
            name: name.to_string(),
            metadata: BTreeMap::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access the config file from the given path: {0}")]
    ConfigFileAccessError(String),
    #[error("Failed to parse config JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("Reference panel entry {0} has an empty name")]
    EmptyReferenceName(usize),
    #[error("Reference {0} appears more than once in the reference panel")]
    DuplicateReference(String),
    #[error("okCoverage ({ok}) must not exceed consensusCoverage ({consensus})")]
    InvalidThresholds { ok: u32, consensus: u32 },
    #[error("pxPerColumn must be at least 1")]
    InvalidColumnWidth,
}

fn default_consensus_coverage() -> u32 {
    DEFAULT_CONSENSUS_COVERAGE
}

fn default_ok_coverage() -> u32 {
    DEFAULT_OK_COVERAGE
}

fn default_px_per_column() -> u32 {
    DEFAULT_PX_PER_COLUMN
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            reference_panel: Vec::new(),
            consensus_coverage: DEFAULT_CONSENSUS_COVERAGE,
            ok_coverage: DEFAULT_OK_COVERAGE,
            px_per_column: DEFAULT_PX_PER_COLUMN,
        }
    }
}

impl RunConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::ConfigFileAccessError(format!("{}: {}", path.display(), e)))?;
        let config = RunConfig::from_json_string(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, reference) in self.reference_panel.iter().enumerate() {
            if reference.name.trim().is_empty() {
                return Err(ConfigError::EmptyReferenceName(i));
            }
            if !seen.insert(reference.name.as_str()) {
                return Err(ConfigError::DuplicateReference(reference.name.clone()));
            }
        }

        if self.ok_coverage > self.consensus_coverage {
            return Err(ConfigError::InvalidThresholds {
                ok: self.ok_coverage,
                consensus: self.consensus_coverage,
            });
        }

        if self.px_per_column == 0 {
            return Err(ConfigError::InvalidColumnWidth);
        }

        Ok(())
    }

    pub fn thresholds(&self) -> DepthThresholds {
        DepthThresholds::new(self.consensus_coverage, self.ok_coverage)
    }

    pub fn reference_names(&self) -> Vec<String> {
        self.reference_panel.iter().map(|r| r.name.clone()).collect()
    }
}

fn string_or_number_to_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let val: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match val {
        serde_json::Value::Number(num) => num
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| Error::custom(format!("Invalid threshold: {}", num))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::custom(format!("Invalid threshold: {}", s))),
        other => Err(Error::custom(format!("Invalid threshold: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_STR: &str = r#"{
        "title": "EBOV run 3",
        "referencePanel": [
            {"name": "Makona_1", "description": "Guinea 2014", "length": 18959},
            {"name": "Yambuku"}
        ],
        "consensusCoverage": "500",
        "okCoverage": 50
    }"#;

    #[test]
    fn test_run_config_from_json() {
        let config = RunConfig::from_json_string(JSON_STR).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.reference_names(), vec!["Makona_1", "Yambuku"]);
        assert_eq!(config.consensus_coverage, 500);
        assert_eq!(config.ok_coverage, 50);
        assert_eq!(config.px_per_column, DEFAULT_PX_PER_COLUMN);
        assert_eq!(
            config.reference_panel[0].metadata["length"],
            serde_json::json!(18959)
        );
        assert_eq!(config.thresholds(), DepthThresholds::new(500, 50));
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::from_json_string(r#"{"referencePanel": []}"#).unwrap();
        assert_eq!(config, RunConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold_values() {
        assert!(RunConfig::from_json_string(r#"{"okCoverage": "lots"}"#).is_err());
        assert!(RunConfig::from_json_string(r#"{"okCoverage": -5}"#).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = RunConfig::default();
        config.reference_panel = vec![ReferenceDescriptor::new("a"), ReferenceDescriptor::new("a")];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateReference(name)) if name == "a"
        ));

        config.reference_panel = vec![ReferenceDescriptor::new(" ")];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyReferenceName(0))
        ));

        config.reference_panel.clear();
        config.ok_coverage = 2000;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "okCoverage (2000) must not exceed consensusCoverage (1000)"
        );

        config.ok_coverage = 100;
        config.px_per_column = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidColumnWidth)
        ));
    }

    #[test]
    fn test_config_file() {
        let config = RunConfig::from_path(Path::new("tests/data/run_config.json")).unwrap();
        assert_eq!(config.reference_panel.len(), 3);

        let missing = RunConfig::from_path(Path::new("tests/data/no_such_config.json"));
        assert!(matches!(
            missing,
            Err(ConfigError::ConfigFileAccessError(_))
        ));
    }
}
