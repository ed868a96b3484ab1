//! Error types for the coach_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for coach_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A health metric was outside its accepted range
    #[error("Invalid metric {field}: {value} (expected {min}..={max})")]
    InvalidMetric {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Caller supplied unusable arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Plan not found: {0}")]
    PlanNotFound(Uuid),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Exercise not found: {0}")]
    ExerciseNotFound(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),
}
