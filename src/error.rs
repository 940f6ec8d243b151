//! Error types shared by every module of this crate.

use polars::prelude::PolarsError;
use thiserror::Error;


/// Errors raised while building samples, computing distances,
/// training or querying a learner.
#[derive(Debug, Error)]
pub enum MimlError {
    /// The given sample or bag has an unexpected shape,
    /// or the training sample is empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The learner is queried before it is trained.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The distance metric failed for some pair of bags.
    #[error("Distance metric failed: {0}")]
    MetricFailure(String),

    /// A configuration value that can never yield a model.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Conversion from a `polars::DataFrame` failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// (De)serialization of a configuration failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}


/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, MimlError>;
