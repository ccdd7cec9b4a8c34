//! Calculator error types.

use thiserror::Error;

/// Errors raised when calculator inputs cannot produce a finite estimate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for calculator operations.
pub type CalcResult<T> = std::result::Result<T, CalcError>;
