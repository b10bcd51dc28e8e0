//! Error types for wn-output.

use thiserror::Error;
use wn_mobility::MobilityError;

/// Errors that can occur while recording simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// A trace sample asked the engine for an invalid time.
    #[error("trace sample failed: {0}")]
    Mobility(#[from] MobilityError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
