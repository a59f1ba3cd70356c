//! Per-tier value ranges for the 16 water-quality parameters
//!
//! The built-in table follows WHO/EPA drinking-water guidance for the normal
//! tier, values exceeding those limits for the contaminated (high) tier and
//! extreme exceedances for the critical tier.

use aquasentinel_core::{Error, Result, RiskTier, WaterParameter};
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]` of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive membership test
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, param: WaterParameter, tier: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::config(format!(
                "{} {} range has non-finite bounds",
                param, tier
            )));
        }
        if self.min < 0.0 {
            return Err(Error::config(format!(
                "{} {} range has negative min {}",
                param, tier, self.min
            )));
        }
        if self.min > self.max {
            return Err(Error::config(format!(
                "{} {} range has min {} greater than max {}",
                param, tier, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Ranges of one parameter for each tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRanges {
    pub normal: ParameterRange,

    /// Used for the high tier
    pub contaminated: ParameterRange,

    pub critical: ParameterRange,
}

impl TierRanges {
    const fn new(normal: (f64, f64), contaminated: (f64, f64), critical: (f64, f64)) -> Self {
        Self {
            normal: ParameterRange::new(normal.0, normal.1),
            contaminated: ParameterRange::new(contaminated.0, contaminated.1),
            critical: ParameterRange::new(critical.0, critical.1),
        }
    }

    /// Range applicable to a tier
    pub fn for_tier(&self, tier: RiskTier) -> ParameterRange {
        match tier {
            RiskTier::Normal => self.normal,
            RiskTier::High => self.contaminated,
            RiskTier::Critical => self.critical,
        }
    }

    fn validate(&self, param: WaterParameter) -> Result<()> {
        self.normal.validate(param, "normal")?;
        self.contaminated.validate(param, "contaminated")?;
        self.critical.validate(param, "critical")
    }
}

/// Built-in ranges, indexed by [`WaterParameter::index`]
const BUILTIN_RANGES: [TierRanges; WaterParameter::COUNT] = [
    // ph_value
    TierRanges::new((6.5, 8.5), (4.0, 6.0), (2.0, 4.0)),
    // turbidity_value
    TierRanges::new((0.1, 4.0), (5.0, 15.0), (15.0, 50.0)),
    // ammonia_nitrogen_value
    TierRanges::new((0.0, 0.5), (1.0, 5.0), (5.0, 20.0)),
    // nitrate_nitrogen_value
    TierRanges::new((0.0, 10.0), (15.0, 50.0), (50.0, 100.0)),
    // total_coliform_value
    TierRanges::new((0.0, 100.0), (500.0, 2000.0), (2000.0, 10000.0)),
    // calcium_value
    TierRanges::new((20.0, 200.0), (300.0, 500.0), (500.0, 1000.0)),
    // chloride_value
    TierRanges::new((10.0, 250.0), (400.0, 800.0), (800.0, 2000.0)),
    // fluoride_value
    TierRanges::new((0.5, 1.5), (2.0, 4.0), (4.0, 10.0)),
    // phosphate_phosphorus_value
    TierRanges::new((0.0, 0.3), (0.5, 2.0), (2.0, 10.0)),
    // potassium_value
    TierRanges::new((5.0, 50.0), (100.0, 300.0), (300.0, 1000.0)),
    // sodium_value
    TierRanges::new((10.0, 200.0), (300.0, 600.0), (600.0, 2000.0)),
    // sulphate_value
    TierRanges::new((10.0, 250.0), (400.0, 800.0), (800.0, 2000.0)),
    // total_alkalinity_value
    TierRanges::new((50.0, 300.0), (400.0, 800.0), (800.0, 2000.0)),
    // total_dissolved_solids_value
    TierRanges::new((100.0, 500.0), (800.0, 1500.0), (1500.0, 5000.0)),
    // total_hardness_value
    TierRanges::new((50.0, 300.0), (400.0, 800.0), (800.0, 2000.0)),
    // total_suspended_solids_value
    TierRanges::new((5.0, 50.0), (100.0, 300.0), (300.0, 1000.0)),
];

/// Immutable 16x3 range table
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTable {
    ranges: [TierRanges; WaterParameter::COUNT],
}

impl RangeTable {
    /// The built-in table
    pub fn builtin() -> Self {
        Self {
            ranges: BUILTIN_RANGES,
        }
    }

    /// Built-in table with selected parameters replaced.
    ///
    /// Every override is validated before it is applied.
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a WaterParameter, &'a TierRanges)>,
    {
        let mut table = Self::builtin();
        for (param, ranges) in overrides {
            ranges.validate(*param)?;
            table.ranges[param.index()] = *ranges;
        }
        Ok(table)
    }

    /// All tier ranges of one parameter
    pub fn get(&self, param: WaterParameter) -> &TierRanges {
        &self.ranges[param.index()]
    }

    /// Range of one parameter in one tier
    pub fn range(&self, param: WaterParameter, tier: RiskTier) -> ParameterRange {
        self.get(param).for_tier(tier)
    }
}

impl Default for RangeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builtin_table_is_well_formed() {
        let table = RangeTable::builtin();
        for param in WaterParameter::ALL {
            table.get(param).validate(param).unwrap();
        }
    }

    #[test]
    fn test_tier_lookup() {
        let table = RangeTable::builtin();
        assert_eq!(
            table.range(WaterParameter::AmmoniaNitrogen, RiskTier::High),
            ParameterRange::new(1.0, 5.0)
        );
        assert_eq!(
            table.range(WaterParameter::Ph, RiskTier::Critical),
            ParameterRange::new(2.0, 4.0)
        );
        assert_eq!(
            table.range(WaterParameter::TotalColiform, RiskTier::Normal),
            ParameterRange::new(0.0, 100.0)
        );
    }

    #[test]
    fn test_override_replaces_single_parameter() {
        let mut overrides = HashMap::new();
        overrides.insert(
            WaterParameter::Fluoride,
            TierRanges::new((0.7, 1.2), (1.5, 3.0), (3.0, 8.0)),
        );

        let table = RangeTable::with_overrides(&overrides).unwrap();
        assert_eq!(
            table.range(WaterParameter::Fluoride, RiskTier::Normal),
            ParameterRange::new(0.7, 1.2)
        );
        assert_eq!(
            table.get(WaterParameter::Chloride),
            RangeTable::builtin().get(WaterParameter::Chloride)
        );
    }

    #[test]
    fn test_override_rejects_inverted_range() {
        let mut overrides = HashMap::new();
        overrides.insert(
            WaterParameter::Sodium,
            TierRanges::new((10.0, 200.0), (600.0, 300.0), (600.0, 2000.0)),
        );

        let err = RangeTable::with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("sodium_value contaminated"));
    }

    #[test]
    fn test_override_rejects_non_finite() {
        let mut overrides = HashMap::new();
        overrides.insert(
            WaterParameter::Ph,
            TierRanges::new((6.5, f64::INFINITY), (4.0, 6.0), (2.0, 4.0)),
        );
        assert!(RangeTable::with_overrides(&overrides).is_err());
    }

    #[test]
    fn test_override_rejects_negative_bounds() {
        let mut overrides = HashMap::new();
        overrides.insert(
            WaterParameter::Ph,
            TierRanges::new((6.5, 8.5), (4.0, 6.0), (-4.0, -2.0)),
        );

        let err = RangeTable::with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("ph_value critical range has negative min"));
    }
}
