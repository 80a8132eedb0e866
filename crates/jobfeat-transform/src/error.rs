//! Error types for preprocessing stages.

use thiserror::Error;

/// Errors that can occur while configuring or running a stage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    // === Column Errors ===
    /// Requested columns are absent from the dataset.
    #[error("the dataset does not include the columns: {columns:?}")]
    MissingColumns { columns: Vec<String> },

    /// Requested columns are absent from a lookup table.
    #[error("the lookup table does not include the columns: {columns:?}")]
    MissingLookupColumns { columns: Vec<String> },

    /// An output column name would occur twice.
    #[error("column '{column}' would be created more than once")]
    DuplicateColumn { column: String },

    // === Coercion Errors ===
    /// A column could not be converted to timestamps.
    #[error("cannot convert column '{column}' to a timestamp: {reason}")]
    TypeCoercion { column: String, reason: String },

    /// A column holds a type the stage cannot compute with.
    #[error("column '{column}' has type {found}, expected {expected}")]
    UnexpectedType {
        column: String,
        expected: &'static str,
        found: String,
    },

    // === Configuration Errors ===
    /// Stage parameters are unusable.
    #[error("invalid {stage} configuration: {reason}")]
    InvalidConfig { stage: &'static str, reason: String },

    /// A stage description referenced a lookup table that was not supplied.
    #[error("unknown lookup table '{name}'")]
    UnknownLookupTable { name: String },

    /// Stage descriptions could not be parsed.
    #[error("failed to parse stage configuration: {0}")]
    Config(#[from] serde_json::Error),

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for stage operations.
pub type Result<T> = std::result::Result<T, TransformError>;
