//! Core types for AquaSentinel

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Environmental risk tier derived from ambient humidity and temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Both readings within acceptable ranges
    Normal,
    /// Either reading elevated
    High,
    /// Both readings extreme
    Critical,
}

impl RiskTier {
    /// All tiers in ascending order of risk
    pub const ALL: [RiskTier; 3] = [RiskTier::Normal, RiskTier::High, RiskTier::Critical];

    /// Whether this tier implies environmental contamination
    pub fn is_contaminated(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Position of this tier in per-tier tables
    pub fn index(&self) -> usize {
        match self {
            Self::Normal => 0,
            Self::High => 1,
            Self::Critical => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the 16 measured water-quality parameters.
///
/// Declaration order is the canonical feature-column order, so iterating a
/// [`WaterQualitySample`] always yields parameters in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum WaterParameter {
    Ph,
    Turbidity,
    AmmoniaNitrogen,
    NitrateNitrogen,
    TotalColiform,
    Calcium,
    Chloride,
    Fluoride,
    PhosphatePhosphorus,
    Potassium,
    Sodium,
    Sulphate,
    TotalAlkalinity,
    TotalDissolvedSolids,
    TotalHardness,
    TotalSuspendedSolids,
}

impl WaterParameter {
    /// Number of parameters in a complete sample
    pub const COUNT: usize = 16;

    /// All parameters in canonical feature-column order
    pub const ALL: [WaterParameter; Self::COUNT] = [
        Self::Ph,
        Self::Turbidity,
        Self::AmmoniaNitrogen,
        Self::NitrateNitrogen,
        Self::TotalColiform,
        Self::Calcium,
        Self::Chloride,
        Self::Fluoride,
        Self::PhosphatePhosphorus,
        Self::Potassium,
        Self::Sodium,
        Self::Sulphate,
        Self::TotalAlkalinity,
        Self::TotalDissolvedSolids,
        Self::TotalHardness,
        Self::TotalSuspendedSolids,
    ];

    /// Feature-column name used by the scaler and classifier
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ph => "ph_value",
            Self::Turbidity => "turbidity_value",
            Self::AmmoniaNitrogen => "ammonia_nitrogen_value",
            Self::NitrateNitrogen => "nitrate_nitrogen_value",
            Self::TotalColiform => "total_coliform_value",
            Self::Calcium => "calcium_value",
            Self::Chloride => "chloride_value",
            Self::Fluoride => "fluoride_value",
            Self::PhosphatePhosphorus => "phosphate_phosphorus_value",
            Self::Potassium => "potassium_value",
            Self::Sodium => "sodium_value",
            Self::Sulphate => "sulphate_value",
            Self::TotalAlkalinity => "total_alkalinity_value",
            Self::TotalDissolvedSolids => "total_dissolved_solids_value",
            Self::TotalHardness => "total_hardness_value",
            Self::TotalSuspendedSolids => "total_suspended_solids_value",
        }
    }

    /// Position in canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for WaterParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaterParameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                Error::feature_mismatch(format!("unknown water-quality parameter '{}'", s))
            })
    }
}

impl TryFrom<String> for WaterParameter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WaterParameter> for &'static str {
    fn from(param: WaterParameter) -> Self {
        param.name()
    }
}

/// A water sample: measured value per parameter.
///
/// Samples built by the synthesizer are always complete. Samples supplied
/// by callers may be partial; completeness is checked at prediction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaterQualitySample {
    values: BTreeMap<WaterParameter, f64>,
}

impl WaterQualitySample {
    /// Create an empty sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value
    pub fn set(&mut self, param: WaterParameter, value: f64) {
        self.values.insert(param, value);
    }

    /// Builder-style setter
    pub fn with(mut self, param: WaterParameter, value: f64) -> Self {
        self.set(param, value);
        self
    }

    /// Get a parameter value
    pub fn get(&self, param: WaterParameter) -> Option<f64> {
        self.values.get(&param).copied()
    }

    /// Get a value by feature-column name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        name.parse::<WaterParameter>()
            .ok()
            .and_then(|param| self.get(param))
    }

    /// Number of parameters present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether all 16 parameters are present
    pub fn is_complete(&self) -> bool {
        self.values.len() == WaterParameter::COUNT
    }

    /// Parameters not present in this sample, in canonical order
    pub fn missing(&self) -> Vec<WaterParameter> {
        WaterParameter::ALL
            .iter()
            .copied()
            .filter(|p| !self.values.contains_key(p))
            .collect()
    }

    /// Iterate values in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (WaterParameter, f64)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }

    /// Borderline reference sample used for smoke testing a loaded model
    pub fn reference() -> Self {
        use WaterParameter::*;

        [
            (Ph, 6.4),
            (Turbidity, 4.5),
            (AmmoniaNitrogen, 1.0),
            (NitrateNitrogen, 8.0),
            (TotalColiform, 0.0),
            (Calcium, 100.0),
            (Chloride, 200.0),
            (Fluoride, 1.6),
            (PhosphatePhosphorus, 0.3),
            (Potassium, 10.0),
            (Sodium, 150.0),
            (Sulphate, 200.0),
            (TotalAlkalinity, 250.0),
            (TotalDissolvedSolids, 450.0),
            (TotalHardness, 250.0),
            (TotalSuspendedSolids, 45.0),
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<(WaterParameter, f64)> for WaterQualitySample {
    fn from_iter<I: IntoIterator<Item = (WaterParameter, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Ambient humidity/temperature reading from a field sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Relative humidity in percent
    pub humidity: f64,

    /// Temperature in degrees Celsius
    #[serde(alias = "temperature")]
    pub temperature_celsius: f64,
}

impl SensorReading {
    pub const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);
    pub const TEMPERATURE_RANGE: (f64, f64) = (-50.0, 60.0);

    /// Create a validated reading
    pub fn new(humidity: f64, temperature_celsius: f64) -> Result<Self> {
        let reading = Self {
            humidity,
            temperature_celsius,
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Check both values lie within the accepted sensor ranges
    pub fn validate(&self) -> Result<()> {
        let (h_min, h_max) = Self::HUMIDITY_RANGE;
        if !(h_min..=h_max).contains(&self.humidity) {
            return Err(Error::invalid_reading(format!(
                "humidity {} outside [{}, {}]",
                self.humidity, h_min, h_max
            )));
        }

        let (t_min, t_max) = Self::TEMPERATURE_RANGE;
        if !(t_min..=t_max).contains(&self.temperature_celsius) {
            return Err(Error::invalid_reading(format!(
                "temperature {} outside [{}, {}]",
                self.temperature_celsius, t_min, t_max
            )));
        }

        Ok(())
    }
}

/// Environmental tier with its human-readable explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub tier: RiskTier,
    pub is_contaminated: bool,
    pub reason: String,
}

/// Output of the water-quality classifier after mask decoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Class label emitted by the classifier (an 8-bit health-risk mask)
    pub predicted_class: i64,

    /// Probability of the predicted class, in percent with 2 decimals
    pub confidence: f64,

    /// Zero-padded 8-character mask, most significant bit first
    pub binary_representation: String,

    /// Resolved categories in bit-position order A to H
    pub health_risks: Vec<String>,

    /// True iff no category applies
    pub is_safe: bool,
}

impl PredictionResult {
    /// Number of decoded health risks
    pub fn risk_count(&self) -> usize {
        self.health_risks.len()
    }
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Whether this severity should raise an alert
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::Warning | Self::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final severity decision for a reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityVerdict {
    pub is_high: bool,
    pub severity: Severity,

    /// Environmental summary, passed through unchanged
    pub reason: String,

    pub health_risks_summary: String,
}

/// Environmental context reported alongside an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    pub humidity: f64,
    pub temperature_celsius: f64,
    pub is_contaminated: bool,
    pub condition_summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_names_round_trip() {
        for param in WaterParameter::ALL {
            assert_eq!(param.name().parse::<WaterParameter>().unwrap(), param);
        }
        assert!("chlorine_value".parse::<WaterParameter>().is_err());
    }

    #[test]
    fn test_parameter_index_matches_canonical_order() {
        for (i, param) in WaterParameter::ALL.iter().enumerate() {
            assert_eq!(param.index(), i);
        }
    }

    #[test]
    fn test_reference_sample_is_complete() {
        let sample = WaterQualitySample::reference();
        assert!(sample.is_complete());
        assert!(sample.missing().is_empty());
        assert_eq!(sample.get(WaterParameter::Ph), Some(6.4));
        assert_eq!(sample.get_by_name("total_suspended_solids_value"), Some(45.0));
    }

    #[test]
    fn test_sample_iterates_in_canonical_order() {
        let sample = WaterQualitySample::new()
            .with(WaterParameter::TotalHardness, 1.0)
            .with(WaterParameter::Ph, 7.0)
            .with(WaterParameter::Chloride, 3.0);

        let order: Vec<_> = sample.iter().map(|(p, _)| p).collect();
        assert_eq!(
            order,
            vec![
                WaterParameter::Ph,
                WaterParameter::Chloride,
                WaterParameter::TotalHardness
            ]
        );
        assert_eq!(sample.missing().len(), 13);
    }

    #[test]
    fn test_sample_json_uses_column_names() {
        let sample = WaterQualitySample::new().with(WaterParameter::Fluoride, 1.5);
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"fluoride_value":1.5}"#);

        let parsed: WaterQualitySample = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample);

        let unknown = serde_json::from_str::<WaterQualitySample>(r#"{"lead_value":0.1}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_sensor_reading_validation() {
        assert!(SensorReading::new(60.0, 25.0).is_ok());
        assert!(SensorReading::new(100.0, 60.0).is_ok());
        assert!(matches!(
            SensorReading::new(101.0, 25.0),
            Err(Error::InvalidReading(_))
        ));
        assert!(matches!(
            SensorReading::new(50.0, -51.0),
            Err(Error::InvalidReading(_))
        ));
        assert!(SensorReading::new(f64::NAN, 20.0).is_err());
    }

    #[test]
    fn test_severity_alerting() {
        assert!(!Severity::Info.is_alert());
        assert!(Severity::Warning.is_alert());
        assert!(Severity::Critical.is_alert());
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), r#""warning""#);
    }

    #[test]
    fn test_tier_contamination() {
        assert!(!RiskTier::Normal.is_contaminated());
        assert!(RiskTier::High.is_contaminated());
        assert!(RiskTier::Critical.is_contaminated());
    }
}
