//! Command execution for the `aquasentinel` binary
//!
//! Every command writes a single pretty-printed JSON document to stdout.

use crate::cli::{Cli, Commands, ReadingArgs};
use anyhow::{Context, Result};
use aquasentinel_core::{SensorReading, WaterQualitySample};
use aquasentinel_inference::{
    load_model_context, AlertThresholds, AnalyzerConfig, HealthRiskDecoder, ModelContext,
    RiskTierClassifier, SensorAnalysis, SensorAnalyzer, ThresholdAlert, WaterQualityPredictor,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one reading in a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub index: usize,
    pub reading: SensorReading,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SensorAnalysis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    fn new(
        index: usize,
        reading: SensorReading,
        result: aquasentinel_core::Result<SensorAnalysis>,
    ) -> Self {
        match result {
            Ok(analysis) => Self {
                index,
                reading,
                analysis: Some(analysis),
                error: None,
            },
            Err(e) => Self {
                index,
                reading,
                analysis: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Run the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AnalyzerConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if cli.artifacts.is_some() {
        config.artifacts = cli.artifacts.clone();
    }

    match cli.command {
        Commands::Analyze { reading, seed } => {
            let reading = to_reading(reading)?;
            let analyzer = build_analyzer(&config)?;
            let mut rng = rng_for(seed.or(config.seed));
            let analysis = analyzer.analyze(&reading, &mut rng)?;
            print_json(&analysis)
        }

        Commands::Batch { input, seed } => {
            let readings = read_readings(&input)?;
            info!(count = readings.len(), input = %input.display(), "Starting batch analysis");

            let analyzer = Arc::new(build_analyzer(&config)?);
            let outcomes = analyze_batch(analyzer, readings, seed.or(config.seed)).await?;

            let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
            info!(total = outcomes.len(), failed, "Batch analysis complete");
            print_json(&outcomes)
        }

        Commands::Predict { sample, reference } => {
            let sample = match (sample, reference) {
                (_, true) => WaterQualitySample::reference(),
                (Some(path), false) => read_sample(&path)?,
                (None, false) => anyhow::bail!("Either --sample or --reference is required"),
            };
            let predictor = WaterQualityPredictor::new(Arc::new(load_context(&config)?));
            print_json(&predictor.predict(&sample)?)
        }

        Commands::Synthesize { reading, seed } => {
            let reading = to_reading(reading)?;
            let analyzer =
                SensorAnalyzer::from_config(&config, Arc::new(ModelContext::unloaded()))?;
            let mut rng = rng_for(seed.or(config.seed));

            let tier =
                RiskTierClassifier::new().classify(reading.humidity, reading.temperature_celsius);
            let sample = analyzer.generate_water_quality_data(
                reading.humidity,
                reading.temperature_celsius,
                &mut rng,
            );
            print_json(&serde_json::json!({
                "tier": tier,
                "sample": sample,
            }))
        }

        Commands::Decode { class } => {
            let decoded = HealthRiskDecoder::new().decode(class)?;
            print_json(&serde_json::json!({
                "predicted_class": class,
                "binary_representation": decoded.binary_representation,
                "health_risks": decoded.health_risks,
                "is_safe": decoded.is_safe,
            }))
        }

        Commands::Alert {
            reading,
            temp_high_c,
            humidity_high_pct,
        } => {
            let thresholds = AlertThresholds {
                temp_high_c: temp_high_c.unwrap_or(config.alert.temp_high_c),
                humidity_high_pct: humidity_high_pct.unwrap_or(config.alert.humidity_high_pct),
            };
            let decision =
                ThresholdAlert::new(thresholds).evaluate(reading.humidity, reading.temperature);
            print_json(&decision)
        }
    }
}

/// Analyze readings concurrently, one blocking task per reading.
///
/// Each task owns its own generator: seeded with `seed + index` when a seed
/// is given, from entropy otherwise. A failed reading is reported in its
/// outcome and does not abort the batch.
pub async fn analyze_batch(
    analyzer: Arc<SensorAnalyzer>,
    readings: Vec<SensorReading>,
    seed: Option<u64>,
) -> Result<Vec<BatchOutcome>> {
    let tasks = readings.into_iter().enumerate().map(|(index, reading)| {
        let analyzer = Arc::clone(&analyzer);
        let mut rng = rng_for(seed.map(|s| s.wrapping_add(index as u64)));

        tokio::task::spawn_blocking(move || {
            let result = analyzer.analyze(&reading, &mut rng);
            if let Err(e) = &result {
                debug!(index, error = %e, "Reading failed analysis");
            }
            BatchOutcome::new(index, reading, result)
        })
    });

    futures::future::try_join_all(tasks)
        .await
        .context("Batch analysis task panicked")
}

fn build_analyzer(config: &AnalyzerConfig) -> Result<SensorAnalyzer> {
    let context = Arc::new(load_context(config)?);
    Ok(SensorAnalyzer::from_config(config, context)?)
}

/// Load the model context once, before any inference
fn load_context(config: &AnalyzerConfig) -> Result<ModelContext> {
    match &config.artifacts {
        Some(path) => load_model_context(path)
            .with_context(|| format!("Failed to load model artifacts from {}", path.display())),
        None => {
            warn!("No model artifacts configured; predictions are unavailable");
            Ok(ModelContext::unloaded())
        }
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn to_reading(args: ReadingArgs) -> Result<SensorReading> {
    Ok(SensorReading::new(args.humidity, args.temperature)?)
}

fn read_readings(path: &Path) -> Result<Vec<SensorReading>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid readings file {}", path.display()))
}

fn read_sample(path: &Path) -> Result<WaterQualitySample> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid sample file {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
