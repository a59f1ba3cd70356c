//! Water-quality prediction over an injected model context

use crate::decoder::HealthRiskDecoder;
use crate::model::ModelContext;
use aquasentinel_core::{Error, PredictionResult, Result, WaterQualitySample};
use std::sync::Arc;

/// Scales a sample, classifies it and decodes the health-risk mask.
///
/// Inference is synchronous and not retried; errors go straight back to
/// the caller.
#[derive(Debug, Clone)]
pub struct WaterQualityPredictor {
    context: Arc<ModelContext>,
    decoder: HealthRiskDecoder,
}

impl WaterQualityPredictor {
    pub fn new(context: Arc<ModelContext>) -> Self {
        Self {
            context,
            decoder: HealthRiskDecoder::new(),
        }
    }

    /// Whether the underlying model context is ready
    pub fn is_ready(&self) -> bool {
        self.context.is_loaded()
    }

    pub fn context(&self) -> &ModelContext {
        &self.context
    }

    /// Predict health risks for a sample.
    ///
    /// Errors:
    /// - [`Error::ModelUnavailable`] if the context is not loaded
    /// - [`Error::FeatureMismatch`] if the sample lacks a feature column or a
    ///   value is negative, non-finite or too large for the model
    /// - [`Error::Range`] if the classifier emits a class outside 0..=255
    pub fn predict(&self, sample: &WaterQualitySample) -> Result<PredictionResult> {
        let (scaler, classifier, columns) = self.context.parts()?;

        let raw = columns
            .iter()
            .map(|column| {
                let value = sample.get_by_name(column).ok_or_else(|| {
                    Error::feature_mismatch(format!(
                        "sample is missing feature column '{}'",
                        column
                    ))
                })?;
                check_feature_value(column, value)
            })
            .collect::<Result<Vec<f64>>>()?;

        let scaled = scaler.transform(&raw)?;
        let predicted_class = classifier.predict(&scaled)?;
        let probabilities = classifier.predict_proba(&scaled)?;

        let max_probability = probabilities
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or_else(|| {
                Error::classifier(format!(
                    "{} returned an empty probability distribution",
                    classifier.name()
                ))
            })?;

        let decoded = self.decoder.decode(predicted_class)?;

        Ok(PredictionResult {
            predicted_class,
            confidence: round_percent(max_probability),
            binary_representation: decoded.binary_representation,
            health_risks: decoded.health_risks,
            is_safe: decoded.is_safe,
        })
    }
}

/// Measurements are non-negative and must survive the model's f32 precision
fn check_feature_value(column: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 || value > f64::from(f32::MAX) {
        return Err(Error::feature_mismatch(format!(
            "feature column '{}' has invalid value {}",
            column, value
        )));
    }
    Ok(value)
}

/// Probability as a percentage rounded to 2 decimals
fn round_percent(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(0.87654), 87.65);
        assert_eq!(round_percent(1.0), 100.0);
        assert_eq!(round_percent(0.0), 0.0);
        assert_eq!(round_percent(0.333333), 33.33);
    }

    #[test]
    fn test_check_feature_value() {
        assert_eq!(check_feature_value("ph_value", 7.0).unwrap(), 7.0);
        assert_eq!(check_feature_value("ph_value", 0.0).unwrap(), 0.0);

        for value in [f64::NAN, f64::INFINITY, -0.5, 1e39] {
            let err = check_feature_value("ammonia_nitrogen_value", value).unwrap_err();
            assert!(matches!(err, Error::FeatureMismatch(_)), "{} accepted", value);
            assert!(err.to_string().contains("ammonia_nitrogen_value"));
        }
    }

    #[test]
    fn test_unloaded_context_fails_fast() {
        let predictor = WaterQualityPredictor::new(Arc::new(ModelContext::unloaded()));
        assert!(!predictor.is_ready());

        let err = predictor
            .predict(&WaterQualitySample::reference())
            .unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }
}
