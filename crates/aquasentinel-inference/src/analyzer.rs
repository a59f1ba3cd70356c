//! End-to-end sensor analysis
//!
//! reading -> tier summary -> synthesized sample -> prediction -> severity

use crate::config::AnalyzerConfig;
use crate::model::ModelContext;
use crate::predictor::WaterQualityPredictor;
use crate::ranges::RangeTable;
use crate::severity::SeverityAggregator;
use crate::synthesizer::ParameterSynthesizer;
use crate::tier::RiskTierClassifier;
use aquasentinel_core::{
    ConditionSummary, EnvironmentalConditions, Error, PredictionResult, Result, SensorReading,
    Severity, SeverityVerdict, WaterQualitySample,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

/// Complete analysis of one sensor reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorAnalysis {
    pub is_high: bool,
    pub reason: String,
    pub water_quality_prediction: PredictionResult,
    pub environmental_conditions: EnvironmentalConditions,
    pub health_risks_summary: String,
    pub severity: Severity,

    /// Sample that was classified
    pub sample: WaterQualitySample,
}

/// Composes the tier classifier, synthesizer, predictor and aggregator
#[derive(Debug, Clone)]
pub struct SensorAnalyzer {
    tiers: RiskTierClassifier,
    synthesizer: ParameterSynthesizer,
    predictor: WaterQualityPredictor,
    aggregator: SeverityAggregator,
}

impl SensorAnalyzer {
    pub fn new(context: Arc<ModelContext>, ranges: Arc<RangeTable>) -> Self {
        Self {
            tiers: RiskTierClassifier::new(),
            synthesizer: ParameterSynthesizer::new(ranges),
            predictor: WaterQualityPredictor::new(context),
            aggregator: SeverityAggregator::new(),
        }
    }

    /// Build from configuration; the range overrides are validated here
    pub fn from_config(config: &AnalyzerConfig, context: Arc<ModelContext>) -> Result<Self> {
        Ok(Self::new(context, Arc::new(config.range_table()?)))
    }

    /// Whether the model context is ready for prediction
    pub fn is_ready(&self) -> bool {
        self.predictor.is_ready()
    }

    pub fn synthesizer(&self) -> &ParameterSynthesizer {
        &self.synthesizer
    }

    /// Environmental tier and explanation for a reading
    pub fn get_condition_summary(&self, humidity: f64, temperature: f64) -> ConditionSummary {
        self.tiers.summarize(humidity, temperature)
    }

    /// Synthesize a sample biased toward the reading's tier
    pub fn generate_water_quality_data<R: Rng + ?Sized>(
        &self,
        humidity: f64,
        temperature: f64,
        rng: &mut R,
    ) -> WaterQualitySample {
        let tier = self.tiers.classify(humidity, temperature);
        self.synthesizer.synthesize(tier, rng)
    }

    /// Run the model on a sample
    pub fn predict_water_quality(&self, sample: &WaterQualitySample) -> Result<PredictionResult> {
        self.predictor.predict(sample).map_err(|e| {
            if let Error::Range { class } = e {
                error!(
                    class,
                    model = self.predictor.context().classifier_name().unwrap_or("unknown"),
                    "Classifier emitted a class outside the 8-bit health-risk mask"
                );
            }
            e
        })
    }

    /// Severity verdict for a prediction under the given conditions
    pub fn aggregate(
        &self,
        prediction: &PredictionResult,
        condition: &ConditionSummary,
    ) -> SeverityVerdict {
        self.aggregator.aggregate(prediction, condition)
    }

    /// Analyze a reading with a synthesized sample
    pub fn analyze<R: Rng + ?Sized>(
        &self,
        reading: &SensorReading,
        rng: &mut R,
    ) -> Result<SensorAnalysis> {
        reading.validate()?;
        let sample =
            self.generate_water_quality_data(reading.humidity, reading.temperature_celsius, rng);
        self.analyze_sample(reading, sample)
    }

    /// Analyze a reading against a caller-supplied sample
    pub fn analyze_sample(
        &self,
        reading: &SensorReading,
        sample: WaterQualitySample,
    ) -> Result<SensorAnalysis> {
        let start = Instant::now();
        reading.validate()?;

        let condition = self.get_condition_summary(reading.humidity, reading.temperature_celsius);
        let prediction = self.predict_water_quality(&sample)?;
        let verdict = self.aggregate(&prediction, &condition);

        debug!(
            tier = %condition.tier,
            predicted_class = prediction.predicted_class,
            severity = %verdict.severity,
            latency_us = start.elapsed().as_micros() as u64,
            "Sensor analysis complete"
        );

        Ok(SensorAnalysis {
            is_high: verdict.is_high,
            reason: verdict.reason,
            water_quality_prediction: prediction,
            environmental_conditions: EnvironmentalConditions {
                humidity: reading.humidity,
                temperature_celsius: reading.temperature_celsius,
                is_contaminated: condition.is_contaminated,
                condition_summary: condition.reason,
            },
            health_risks_summary: verdict.health_risks_summary,
            severity: verdict.severity,
            sample,
        })
    }
}
