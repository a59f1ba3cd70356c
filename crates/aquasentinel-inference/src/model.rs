//! Model context: the scaler, classifier and feature-column order used for inference

use aquasentinel_core::{Error, Result};
use std::sync::Arc;

/// Deterministic feature transform fitted outside this crate
pub trait FeatureScaler: Send + Sync {
    /// Transform a raw feature vector given in feature-column order
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;
}

/// Trained multiclass water-quality classifier
pub trait QualityClassifier: Send + Sync {
    /// Predicted class label
    fn predict(&self, features: &[f64]) -> Result<i64>;

    /// Probability distribution over the classifier's classes
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Read-only model state shared by all predictions.
///
/// A context that is missing any of its three parts is "not loaded" and
/// every prediction against it fails with [`Error::ModelUnavailable`].
#[derive(Clone, Default)]
pub struct ModelContext {
    scaler: Option<Arc<dyn FeatureScaler>>,
    classifier: Option<Arc<dyn QualityClassifier>>,
    feature_columns: Option<Vec<String>>,
}

impl ModelContext {
    /// Create a fully loaded context
    pub fn new(
        scaler: Arc<dyn FeatureScaler>,
        classifier: Arc<dyn QualityClassifier>,
        feature_columns: Vec<String>,
    ) -> Self {
        Self {
            scaler: Some(scaler),
            classifier: Some(classifier),
            feature_columns: Some(feature_columns),
        }
    }

    /// Context with nothing loaded
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Set the scaler
    pub fn with_scaler(mut self, scaler: Arc<dyn FeatureScaler>) -> Self {
        self.scaler = Some(scaler);
        self
    }

    /// Set the classifier
    pub fn with_classifier(mut self, classifier: Arc<dyn QualityClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Set the feature-column order
    pub fn with_feature_columns(mut self, columns: Vec<String>) -> Self {
        self.feature_columns = Some(columns);
        self
    }

    /// Whether scaler, classifier and feature columns are all present
    pub fn is_loaded(&self) -> bool {
        self.scaler.is_some() && self.classifier.is_some() && self.feature_columns.is_some()
    }

    /// Name of the loaded classifier, if any
    pub fn classifier_name(&self) -> Option<&str> {
        self.classifier.as_deref().map(|c| c.name())
    }

    /// Borrow all three parts or report which one is missing
    pub fn parts(&self) -> Result<(&dyn FeatureScaler, &dyn QualityClassifier, &[String])> {
        let scaler = self
            .scaler
            .as_deref()
            .ok_or_else(|| Error::model_unavailable("feature scaler not loaded"))?;
        let classifier = self
            .classifier
            .as_deref()
            .ok_or_else(|| Error::model_unavailable("classifier not loaded"))?;
        let columns = self
            .feature_columns
            .as_deref()
            .ok_or_else(|| Error::model_unavailable("feature columns not loaded"))?;

        Ok((scaler, classifier, columns))
    }
}

impl std::fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelContext")
            .field("scaler", &self.scaler.is_some())
            .field("classifier", &self.classifier_name())
            .field("feature_columns", &self.feature_columns)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl FeatureScaler for Identity {
        fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
            Ok(features.to_vec())
        }
    }

    struct Constant;

    impl QualityClassifier for Constant {
        fn predict(&self, _features: &[f64]) -> Result<i64> {
            Ok(0)
        }

        fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>> {
            Ok(vec![1.0])
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn test_unloaded_context_reports_missing_part() {
        let context = ModelContext::unloaded();
        assert!(!context.is_loaded());
        let err = context.parts().err().unwrap();
        assert!(matches!(err, Error::ModelUnavailable(_)));
        assert!(err.is_retriable());
    }

    #[test]
    fn test_partial_context_is_not_loaded() {
        let context = ModelContext::unloaded()
            .with_scaler(Arc::new(Identity))
            .with_classifier(Arc::new(Constant));

        assert!(!context.is_loaded());
        let err = context.parts().err().unwrap();
        assert!(err.to_string().contains("feature columns"));
    }

    #[test]
    fn test_loaded_context() {
        let context = ModelContext::new(
            Arc::new(Identity),
            Arc::new(Constant),
            vec!["ph_value".to_string()],
        );

        assert!(context.is_loaded());
        assert_eq!(context.classifier_name(), Some("constant"));
        let (_, _, columns) = context.parts().unwrap();
        assert_eq!(columns, ["ph_value".to_string()]);
    }
}
