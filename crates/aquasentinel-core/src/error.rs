//! Error types for AquaSentinel

/// Result type alias using AquaSentinel's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for AquaSentinel operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Scaler, classifier or feature columns have not been loaded
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Sample does not provide a feature column the model expects
    #[error("feature mismatch: {0}")]
    FeatureMismatch(String),

    /// Predicted class cannot be represented as an 8-bit health-risk mask
    #[error("predicted class {class} is outside the 8-bit mask range [0, 255]")]
    Range { class: i64 },

    /// Sensor reading outside the accepted physical range
    #[error("invalid sensor reading: {0}")]
    InvalidReading(String),

    /// Configuration and artifact validation errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Numeric backend failures during inference
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new feature-mismatch error
    pub fn feature_mismatch(msg: impl Into<String>) -> Self {
        Self::FeatureMismatch(msg.into())
    }

    /// Create a new invalid-reading error
    pub fn invalid_reading(msg: impl Into<String>) -> Self {
        Self::InvalidReading(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Whether the caller may retry once the service is ready.
    ///
    /// Only a missing model is transient; every other variant is a setup
    /// problem or a data-contract violation.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_))
    }
}
