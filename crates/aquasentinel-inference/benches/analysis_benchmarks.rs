//! Latency benchmarks for the sensor analysis pipeline
//!
//! Run with: cargo bench -p aquasentinel-inference

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use aquasentinel_core::{RiskTier, SensorReading, WaterParameter};
use aquasentinel_inference::{
    ClassifierSpec, HealthRiskDecoder, ModelArtifacts, ParameterSynthesizer, RangeTable,
    ScalerSpec, SensorAnalyzer,
};

fn bench_model() -> ModelArtifacts {
    let classes: Vec<i64> = (0..=255).collect();
    let weights = classes
        .iter()
        .map(|c| (0..16).map(|i| ((c + i) % 7) as f64 * 0.01).collect())
        .collect();

    ModelArtifacts {
        name: "bench".to_string(),
        feature_columns: WaterParameter::ALL
            .iter()
            .map(|p| p.name().to_string())
            .collect(),
        scaler: ScalerSpec {
            mean: vec![100.0; 16],
            scale: vec![50.0; 16],
        },
        classifier: ClassifierSpec {
            bias: vec![0.0; classes.len()],
            classes,
            weights,
        },
    }
}

fn benchmark_synthesizer(c: &mut Criterion) {
    let synthesizer = ParameterSynthesizer::default();
    let mut rng = StdRng::seed_from_u64(1);

    let mut group = c.benchmark_group("Synthesizer");
    for tier in RiskTier::ALL {
        group.bench_with_input(BenchmarkId::new("synthesize", tier), &tier, |b, tier| {
            b.iter(|| synthesizer.synthesize(black_box(*tier), &mut rng));
        });
    }
    group.finish();
}

fn benchmark_decoder(c: &mut Criterion) {
    let decoder = HealthRiskDecoder::new();
    c.bench_function("decode_mask", |b| {
        b.iter(|| decoder.decode(black_box(0b1010_0101)).unwrap())
    });
}

fn benchmark_analysis(c: &mut Criterion) {
    let context = Arc::new(
        bench_model()
            .into_context()
            .expect("Failed to build bench model"),
    );
    let analyzer = SensorAnalyzer::new(context, Arc::new(RangeTable::builtin()));
    let mut rng = StdRng::seed_from_u64(2);

    let readings = [
        ("normal", SensorReading::new(60.0, 25.0).unwrap()),
        ("high", SensorReading::new(85.0, 38.0).unwrap()),
        ("critical", SensorReading::new(95.0, 42.0).unwrap()),
    ];

    let mut group = c.benchmark_group("Sensor_Analysis");
    group.sample_size(100);
    for (name, reading) in readings {
        group.bench_with_input(BenchmarkId::new("analyze", name), &reading, |b, reading| {
            b.iter(|| analyzer.analyze(black_box(reading), &mut rng).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_synthesizer,
    benchmark_decoder,
    benchmark_analysis
);
criterion_main!(benches);
