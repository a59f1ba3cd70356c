//! Environmental risk tier classification

use aquasentinel_core::{ConditionSummary, RiskTier};

/// Maps ambient humidity and temperature to a [`RiskTier`].
///
/// All comparisons are strict: a humidity of exactly 90.0 is not critical.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskTierClassifier;

impl RiskTierClassifier {
    pub const CRITICAL_HUMIDITY: f64 = 90.0;
    pub const CRITICAL_TEMPERATURE: f64 = 40.0;
    pub const HIGH_HUMIDITY: f64 = 80.0;
    pub const HIGH_TEMPERATURE: f64 = 35.0;

    pub fn new() -> Self {
        Self
    }

    /// Classify a reading. Total over all inputs; NaN compares false and
    /// therefore lands in the least severe tier it can.
    pub fn classify(&self, humidity: f64, temperature: f64) -> RiskTier {
        if humidity > Self::CRITICAL_HUMIDITY && temperature > Self::CRITICAL_TEMPERATURE {
            RiskTier::Critical
        } else if humidity > Self::HIGH_HUMIDITY || temperature > Self::HIGH_TEMPERATURE {
            RiskTier::High
        } else {
            RiskTier::Normal
        }
    }

    /// Classify a reading and explain which thresholds were crossed
    pub fn summarize(&self, humidity: f64, temperature: f64) -> ConditionSummary {
        let tier = self.classify(humidity, temperature);

        let reason = match tier {
            RiskTier::Critical => format!(
                "CRITICAL contamination risk: {}",
                triggered_reasons(
                    humidity,
                    temperature,
                    Self::CRITICAL_HUMIDITY,
                    Self::CRITICAL_TEMPERATURE,
                    "Extreme",
                )
            ),
            RiskTier::High => format!(
                "Contamination risk detected: {}",
                triggered_reasons(
                    humidity,
                    temperature,
                    Self::HIGH_HUMIDITY,
                    Self::HIGH_TEMPERATURE,
                    "High",
                )
            ),
            RiskTier::Normal => format!(
                "Normal conditions: Humidity {:.1}%, Temperature {:.1}°C",
                humidity, temperature
            ),
        };

        ConditionSummary {
            tier,
            is_contaminated: tier.is_contaminated(),
            reason,
        }
    }
}

fn triggered_reasons(
    humidity: f64,
    temperature: f64,
    humidity_limit: f64,
    temperature_limit: f64,
    qualifier: &str,
) -> String {
    let mut reasons = Vec::with_capacity(2);
    if humidity > humidity_limit {
        reasons.push(format!("{} humidity ({:.1}%)", qualifier, humidity));
    }
    if temperature > temperature_limit {
        reasons.push(format!("{} temperature ({:.1}°C)", qualifier, temperature));
    }
    reasons.join(", ")
}
