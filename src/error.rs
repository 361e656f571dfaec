//! Error types for the statistics engine
//!
//! Core operations return [`StatsResult`] so callers can match on the exact
//! failure kind. Application layers (config, ingestion, pipeline, CLI) use
//! anyhow and wrap these errors with context.

/// Result type alias for application layers
pub type Result<T> = anyhow::Result<T>;

/// Result type alias for core engine operations
pub type StatsResult<T> = std::result::Result<T, StatsError>;

/// Failures raised by the statistics engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Value {value:?} in field {field} is not numeric")]
    NotNumeric { field: String, value: String },

    #[error("Cannot aggregate {category} over an empty collection")]
    EmptyCollection { category: String },

    #[error("Category {category} has zero range; every player shares the same value")]
    DivisionByZero { category: String },

    #[error("Invalid comparison operator: {symbol:?} (expected \">\" or \"<\")")]
    InvalidComparison { symbol: String },
}

impl StatsError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}
