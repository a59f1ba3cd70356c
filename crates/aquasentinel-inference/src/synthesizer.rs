//! Water-quality sample synthesis biased toward an environmental tier

use crate::ranges::RangeTable;
use crate::tier::RiskTierClassifier;
use aquasentinel_core::{RiskTier, WaterParameter, WaterQualitySample};
use rand::Rng;
use std::sync::Arc;

/// Draws plausible water-quality parameters for a risk tier.
///
/// The random source is always passed in by the caller, so concurrent
/// callers each own their generator and tests can seed it.
#[derive(Debug, Clone)]
pub struct ParameterSynthesizer {
    ranges: Arc<RangeTable>,
}

impl ParameterSynthesizer {
    /// Contamination multiplier bounds for the high tier
    pub const HIGH_BIAS: (f64, f64) = (1.0, 1.5);

    /// Contamination multiplier bounds for the critical tier
    pub const CRITICAL_BIAS: (f64, f64) = (1.2, 2.0);

    /// Create a synthesizer over the given range table
    pub fn new(ranges: Arc<RangeTable>) -> Self {
        Self { ranges }
    }

    /// Range table in use
    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    /// Draw one parameter value for a tier.
    ///
    /// Elevated tiers scale a uniform draw by a contamination factor and
    /// clamp the result back into the tier range.
    pub fn generate_value<R: Rng + ?Sized>(
        &self,
        param: WaterParameter,
        tier: RiskTier,
        rng: &mut R,
    ) -> f64 {
        let range = self.ranges.range(param, tier);
        let base = rng.gen_range(range.min..=range.max);

        let bias = match tier {
            RiskTier::Normal => return base,
            RiskTier::High => Self::HIGH_BIAS,
            RiskTier::Critical => Self::CRITICAL_BIAS,
        };

        let factor = rng.gen_range(bias.0..=bias.1);
        (base * factor).clamp(range.min, range.max)
    }

    /// Draw a complete 16-parameter sample for a tier
    pub fn synthesize<R: Rng + ?Sized>(&self, tier: RiskTier, rng: &mut R) -> WaterQualitySample {
        WaterParameter::ALL
            .iter()
            .map(|param| (*param, self.generate_value(*param, tier, rng)))
            .collect()
    }

    /// Classify a reading and synthesize a sample for its tier
    pub fn generate_water_quality_data<R: Rng + ?Sized>(
        &self,
        humidity: f64,
        temperature: f64,
        rng: &mut R,
    ) -> WaterQualitySample {
        let tier = RiskTierClassifier::new().classify(humidity, temperature);
        self.synthesize(tier, rng)
    }
}

impl Default for ParameterSynthesizer {
    fn default() -> Self {
        Self::new(Arc::new(RangeTable::builtin()))
    }
}
