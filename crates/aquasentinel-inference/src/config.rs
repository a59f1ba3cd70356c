//! Configuration for the sensor analyzer

use crate::alert::AlertThresholds;
use crate::ranges::{RangeTable, TierRanges};
use aquasentinel_core::{Error, Result, WaterParameter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Analyzer configuration (YAML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Model artifacts file (JSON or YAML)
    #[serde(default)]
    pub artifacts: Option<PathBuf>,

    /// Seed for reproducible synthesis; fresh entropy per run when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Raw-reading alert thresholds
    #[serde(default)]
    pub alert: AlertThresholds,

    /// Per-parameter replacements for the built-in range table
    #[serde(default)]
    pub ranges: HashMap<WaterParameter, TierRanges>,
}

impl AnalyzerConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid analyzer config: {}", e)))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load from file if it exists, otherwise defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Built-in range table with this config's overrides applied
    pub fn range_table(&self) -> Result<RangeTable> {
        RangeTable::with_overrides(&self.ranges)
    }
}

/// Load analyzer configuration from file
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalyzerConfig> {
    AnalyzerConfig::from_file(path.as_ref())
        .map_err(|e| Error::config(format!("Failed to load analyzer config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::ParameterRange;
    use aquasentinel_core::RiskTier;

    #[test]
    fn test_analyzer_config_yaml() {
        let yaml = r#"
artifacts: ./models/water_quality.json
seed: 1234
alert:
  temp_high_c: 37.0
  humidity_high_pct: 85.0
ranges:
  fluoride_value:
    normal: { min: 0.7, max: 1.2 }
    contaminated: { min: 1.5, max: 3.0 }
    critical: { min: 3.0, max: 8.0 }
"#;

        let config = AnalyzerConfig::from_yaml(yaml).unwrap();
        assert_eq!(
            config.artifacts,
            Some(PathBuf::from("./models/water_quality.json"))
        );
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.alert.temp_high_c, 37.0);

        let table = config.range_table().unwrap();
        assert_eq!(
            table.range(WaterParameter::Fluoride, RiskTier::High),
            ParameterRange::new(1.5, 3.0)
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AnalyzerConfig::from_yaml("{}").unwrap();
        assert!(config.artifacts.is_none());
        assert!(config.seed.is_none());
        assert_eq!(config.alert, AlertThresholds::default());
        assert_eq!(config.range_table().unwrap(), RangeTable::builtin());
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let yaml = r#"
ranges:
  lead_value:
    normal: { min: 0.0, max: 0.01 }
    contaminated: { min: 0.01, max: 0.1 }
    critical: { min: 0.1, max: 1.0 }
"#;
        assert!(matches!(AnalyzerConfig::from_yaml(yaml), Err(Error::Config(_))));
    }

    #[test]
    fn test_negative_override_rejected() {
        let yaml = r#"
ranges:
  ph_value:
    normal: { min: 6.5, max: 8.5 }
    contaminated: { min: 4.0, max: 6.0 }
    critical: { min: -4.0, max: -2.0 }
"#;
        let config = AnalyzerConfig::from_yaml(yaml).unwrap();
        let err = config.range_table().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("negative min"));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(AnalyzerConfig::load_or_default(&missing).unwrap().seed.is_none());

        let present = dir.path().join("config.yaml");
        std::fs::write(&present, "seed: 9\n").unwrap();
        assert_eq!(AnalyzerConfig::load_or_default(&present).unwrap().seed, Some(9));
        assert_eq!(load_config(&present).unwrap().seed, Some(9));
    }
}
