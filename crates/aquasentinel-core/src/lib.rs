//! AquaSentinel Core
//!
//! Core types and error handling shared across AquaSentinel components.
//!
//! This crate provides:
//! - Environmental risk tiers and sensor readings
//! - The 16 water-quality parameters and sample container
//! - Prediction and severity result types
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ConditionSummary, EnvironmentalConditions, PredictionResult, RiskTier, SensorReading,
    Severity, SeverityVerdict, WaterParameter, WaterQualitySample,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ConditionSummary, PredictionResult, RiskTier, SensorReading, Severity, SeverityVerdict,
        WaterParameter, WaterQualitySample,
    };
}
