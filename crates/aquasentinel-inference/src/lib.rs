//! AquaSentinel Inference
//!
//! Turns an ambient humidity/temperature reading into a water-quality
//! health-risk verdict:
//! - Tier classification of the environmental reading
//! - Synthesis of a 16-parameter water sample biased toward that tier
//! - Scaling and classification through an injected model context
//! - Decoding of the predicted class as an 8-bit health-risk mask
//! - Aggregation of risks and contamination into a severity verdict
//!
//! All inference runs in-process on CPU and never blocks on I/O.

pub mod alert;
pub mod analyzer;
pub mod config;
pub mod decoder;
pub mod model;
pub mod model_loader;
pub mod predictor;
pub mod ranges;
pub mod severity;
pub mod synthesizer;
pub mod tier;

pub use alert::{AlertDecision, AlertThresholds, ThresholdAlert};
pub use analyzer::{SensorAnalysis, SensorAnalyzer};
pub use config::{load_config, AnalyzerConfig};
pub use decoder::{DecodedMask, HealthRiskDecoder, RiskCategory, RISK_CATEGORIES};
pub use model::{FeatureScaler, ModelContext, QualityClassifier};
pub use model_loader::{
    load_model_context, ClassifierSpec, LinearClassifier, ModelArtifacts, ScalerSpec,
    StandardScaler,
};
pub use predictor::WaterQualityPredictor;
pub use ranges::{ParameterRange, RangeTable, TierRanges};
pub use severity::SeverityAggregator;
pub use synthesizer::ParameterSynthesizer;
pub use tier::RiskTierClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::{SensorAnalysis, SensorAnalyzer};
    pub use crate::decoder::HealthRiskDecoder;
    pub use crate::model::{FeatureScaler, ModelContext, QualityClassifier};
    pub use crate::predictor::WaterQualityPredictor;
    pub use crate::severity::SeverityAggregator;
    pub use crate::synthesizer::ParameterSynthesizer;
    pub use crate::tier::RiskTierClassifier;
}
