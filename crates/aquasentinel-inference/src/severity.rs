//! Severity aggregation of decoded risks and environmental contamination

use aquasentinel_core::{ConditionSummary, PredictionResult, Severity, SeverityVerdict};

/// Combines the decoded health risks and the environmental flag into a verdict
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityAggregator;

impl SeverityAggregator {
    /// Risk count at or above which a verdict is critical
    pub const CRITICAL_RISKS: usize = 4;

    /// Risk count at or above which a verdict is at least a warning
    pub const WARNING_RISKS: usize = 2;

    pub fn new() -> Self {
        Self
    }

    /// Severity for a risk count. Contamination alone forces critical.
    pub fn severity(&self, risk_count: usize, is_contaminated: bool) -> Severity {
        if risk_count >= Self::CRITICAL_RISKS || is_contaminated {
            Severity::Critical
        } else if risk_count >= Self::WARNING_RISKS {
            Severity::Warning
        } else {
            Severity::Info
        }
    }

    /// Build the verdict; the condition reason is passed through unchanged.
    ///
    /// Takes the whole [`ConditionSummary`] so the reason can be carried into
    /// the verdict. Callers holding only the contamination flag should use
    /// [`SeverityAggregator::severity`] with the prediction's risk count.
    pub fn aggregate(
        &self,
        prediction: &PredictionResult,
        condition: &ConditionSummary,
    ) -> SeverityVerdict {
        let severity = self.severity(prediction.risk_count(), condition.is_contaminated);

        SeverityVerdict {
            is_high: severity.is_alert(),
            severity,
            reason: condition.reason.clone(),
            health_risks_summary: health_risks_summary(&prediction.health_risks),
        }
    }
}

/// One-line summary of the decoded risks
pub fn health_risks_summary(health_risks: &[String]) -> String {
    if health_risks.is_empty() {
        "No significant health risks detected".to_string()
    } else {
        format!("Health Risks Detected: {}", health_risks.join("; "))
    }
}
