//! Threshold-based alert decision on raw sensor readings
//!
//! Independent of the water-quality model: a reading is "high" when either
//! value reaches its configured threshold (inclusive).

use serde::{Deserialize, Serialize};

/// Inclusive alert thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    #[serde(default = "default_temp_high_c")]
    pub temp_high_c: f64,

    #[serde(default = "default_humidity_high_pct")]
    pub humidity_high_pct: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temp_high_c: default_temp_high_c(),
            humidity_high_pct: default_humidity_high_pct(),
        }
    }
}

/// Alert decision with a human-readable explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDecision {
    pub is_high: bool,
    pub reason: String,
}

/// Evaluates readings against [`AlertThresholds`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdAlert {
    thresholds: AlertThresholds,
}

impl ThresholdAlert {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    pub fn evaluate(&self, humidity: f64, temperature: f64) -> AlertDecision {
        let AlertThresholds {
            temp_high_c,
            humidity_high_pct,
        } = self.thresholds;

        let mut reasons = Vec::new();
        if temperature >= temp_high_c {
            reasons.push(format!(
                "Temperature too high: {:?}°C ≥ {:?}°C",
                temperature, temp_high_c
            ));
        }
        if humidity >= humidity_high_pct {
            reasons.push(format!(
                "Humidity too high: {:?}% ≥ {:?}%",
                humidity, humidity_high_pct
            ));
        }

        if reasons.is_empty() {
            AlertDecision {
                is_high: false,
                reason: "Within normal range".to_string(),
            }
        } else {
            AlertDecision {
                is_high: true,
                reason: reasons.join("; "),
            }
        }
    }
}

fn default_temp_high_c() -> f64 {
    38.0
}

fn default_humidity_high_pct() -> f64 {
    80.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_normal_range() {
        let decision = ThresholdAlert::default().evaluate(60.0, 25.0);
        assert!(!decision.is_high);
        assert_eq!(decision.reason, "Within normal range");
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let decision = ThresholdAlert::default().evaluate(80.0, 38.0);
        assert!(decision.is_high);
        assert_eq!(
            decision.reason,
            "Temperature too high: 38.0°C ≥ 38.0°C; Humidity too high: 80.0% ≥ 80.0%"
        );
    }

    #[test]
    fn test_single_trigger() {
        let decision = ThresholdAlert::default().evaluate(50.0, 39.5);
        assert!(decision.is_high);
        assert_eq!(decision.reason, "Temperature too high: 39.5°C ≥ 38.0°C");
    }

    #[test]
    fn test_custom_thresholds() {
        let alert = ThresholdAlert::new(AlertThresholds {
            temp_high_c: 30.0,
            humidity_high_pct: 95.0,
        });
        assert!(alert.evaluate(90.0, 31.0).is_high);
        assert!(!alert.evaluate(90.0, 29.0).is_high);
    }

    #[test]
    fn test_thresholds_yaml_defaults() {
        let thresholds: AlertThresholds = serde_yaml::from_str("temp_high_c: 36.5").unwrap();
        assert_eq!(thresholds.temp_high_c, 36.5);
        assert_eq!(thresholds.humidity_high_pct, 80.0);
    }
}
