//! Loading of trained model artifacts
//!
//! Artifacts are a single JSON or YAML document containing the feature
//! column order, standard-scaler statistics and a multinomial linear
//! classifier. The classifier is evaluated with Candle on CPU.

use crate::decoder::HealthRiskDecoder;
use crate::model::{FeatureScaler, ModelContext, QualityClassifier};
use aquasentinel_core::{Error, Result, WaterParameter};
use candle_core::{Device, Tensor, D};
use candle_nn::{Linear, Module};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Serialized model artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifacts {
    /// Model name or version
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Feature columns in the order the scaler and classifier expect
    pub feature_columns: Vec<String>,

    pub scaler: ScalerSpec,

    pub classifier: ClassifierSpec,
}

/// Standard-scaler statistics, one entry per feature column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSpec {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Multinomial linear classifier weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSpec {
    /// Class labels, one per output row
    pub classes: Vec<i64>,

    /// `classes.len()` rows of `feature_columns.len()` weights
    pub weights: Vec<Vec<f64>>,

    /// One bias per class
    pub bias: Vec<f64>,
}

impl ModelArtifacts {
    /// Parse artifacts from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid model artifacts: {}", e)))
    }

    /// Parse artifacts from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load artifacts from file; `.yaml`/`.yml` are read as YAML, anything else as JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::model_unavailable(format!(
                "Model artifacts not found: {:?}",
                path
            )));
        }

        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Check that all vectors agree in size and the columns name known parameters
    pub fn validate(&self) -> Result<()> {
        let n = self.feature_columns.len();
        if n != WaterParameter::COUNT {
            return Err(Error::config(format!(
                "expected {} feature columns, found {}",
                WaterParameter::COUNT,
                n
            )));
        }

        let mut seen = HashSet::with_capacity(n);
        for column in &self.feature_columns {
            column
                .parse::<WaterParameter>()
                .map_err(|_| Error::config(format!("unknown feature column '{}'", column)))?;
            if !seen.insert(column.as_str()) {
                return Err(Error::config(format!("duplicate feature column '{}'", column)));
            }
        }

        if self.scaler.mean.len() != n || self.scaler.scale.len() != n {
            return Err(Error::config(format!(
                "scaler expects {} features, has mean {} and scale {}",
                n,
                self.scaler.mean.len(),
                self.scaler.scale.len()
            )));
        }

        let classifier = &self.classifier;
        let k = classifier.classes.len();
        if k == 0 {
            return Err(Error::config("classifier has no classes"));
        }
        if classifier.weights.len() != k || classifier.bias.len() != k {
            return Err(Error::config(format!(
                "classifier has {} classes but {} weight rows and {} biases",
                k,
                classifier.weights.len(),
                classifier.bias.len()
            )));
        }
        if let Some(row) = classifier.weights.iter().position(|w| w.len() != n) {
            return Err(Error::config(format!(
                "classifier weight row {} has {} entries, expected {}",
                row,
                classifier.weights[row].len(),
                n
            )));
        }

        Ok(())
    }

    /// Validate and build an inference-ready context
    pub fn into_context(self) -> Result<ModelContext> {
        self.validate()?;

        let unrepresentable: Vec<i64> = self
            .classifier
            .classes
            .iter()
            .copied()
            .filter(|c| !(0..=HealthRiskDecoder::MAX_CLASS).contains(c))
            .collect();
        if !unrepresentable.is_empty() {
            warn!(
                model = %self.name,
                classes = ?unrepresentable,
                "Classifier emits classes outside the 8-bit health-risk mask"
            );
        }

        let scaler = StandardScaler::new(self.scaler.mean, self.scaler.scale);
        let classifier = LinearClassifier::new(self.name, &self.classifier, &Device::Cpu)?;

        Ok(ModelContext::new(
            Arc::new(scaler),
            Arc::new(classifier),
            self.feature_columns,
        ))
    }
}

/// Load artifacts from file and build a model context
pub fn load_model_context(path: impl AsRef<Path>) -> Result<ModelContext> {
    let path = path.as_ref();
    info!("Loading model artifacts from {:?}", path);

    let artifacts = ModelArtifacts::from_file(path)?;
    let name = artifacts.name.clone();
    let classes = artifacts.classifier.classes.len();
    let context = artifacts.into_context()?;

    info!(model = %name, classes, "Model artifacts loaded");
    Ok(context)
}

/// Standardizes features as `(x - mean) / scale`
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler; zero scales are replaced by 1.0 so constant features pass through centred
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Self { mean, scale }
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.mean.len() {
            return Err(Error::feature_mismatch(format!(
                "scaler expects {} features, got {}",
                self.mean.len(),
                features.len()
            )));
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

/// Multinomial logistic classifier: softmax over a single linear layer
pub struct LinearClassifier {
    name: String,
    classes: Vec<i64>,
    num_features: usize,
    linear: Linear,
    device: Device,
}

impl LinearClassifier {
    /// Build the linear layer from a validated spec
    pub fn new(name: impl Into<String>, spec: &ClassifierSpec, device: &Device) -> Result<Self> {
        let num_classes = spec.classes.len();
        let num_features = spec.weights.first().map(Vec::len).unwrap_or(0);

        let flat: Vec<f32> = spec
            .weights
            .iter()
            .flat_map(|row| row.iter().map(|w| *w as f32))
            .collect();
        let weight = Tensor::from_vec(flat, (num_classes, num_features), device)
            .map_err(|e| Error::classifier(format!("Failed to build weights: {}", e)))?;

        let bias: Vec<f32> = spec.bias.iter().map(|b| *b as f32).collect();
        let bias = Tensor::from_vec(bias, num_classes, device)
            .map_err(|e| Error::classifier(format!("Failed to build bias: {}", e)))?;

        Ok(Self {
            name: name.into(),
            classes: spec.classes.clone(),
            num_features,
            linear: Linear::new(weight, Some(bias)),
            device: device.clone(),
        })
    }

    /// Class labels in output order
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn probabilities(&self, features: &[f64]) -> Result<Vec<f32>> {
        if features.len() != self.num_features {
            return Err(Error::feature_mismatch(format!(
                "classifier expects {} features, got {}",
                self.num_features,
                features.len()
            )));
        }

        let input: Vec<f32> = features.iter().map(|x| *x as f32).collect();
        let input = Tensor::from_vec(input, (1, self.num_features), &self.device)
            .map_err(|e| Error::classifier(format!("Failed to build input tensor: {}", e)))?;

        let logits = self
            .linear
            .forward(&input)
            .map_err(|e| Error::classifier(format!("Forward pass failed: {}", e)))?;

        let probs: Vec<f32> = candle_nn::ops::softmax(&logits, D::Minus1)
            .map_err(|e| Error::classifier(format!("Softmax failed: {}", e)))?
            .squeeze(0)
            .map_err(|e| Error::classifier(format!("Squeeze failed: {}", e)))?
            .to_vec1()
            .map_err(|e| Error::classifier(format!("Failed to convert to vec: {}", e)))?;

        if probs.iter().any(|p| p.is_nan()) {
            return Err(Error::classifier(format!(
                "{} produced NaN probabilities",
                self.name
            )));
        }

        Ok(probs)
    }
}

impl QualityClassifier for LinearClassifier {
    fn predict(&self, features: &[f64]) -> Result<i64> {
        let probs = self.probabilities(features)?;

        // First maximum wins on ties.
        let (best, _) = probs
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |(best, max), (idx, p)| {
                if *p > max {
                    (idx, *p)
                } else {
                    (best, max)
                }
            });

        Ok(self.classes[best])
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        Ok(self
            .probabilities(features)?
            .into_iter()
            .map(f64::from)
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn default_model_name() -> String {
    "water-quality-linear".to_string()
}
