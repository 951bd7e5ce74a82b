use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate-wide error type for staging, validation and commit operations.
///
/// Variants mirror the error taxonomy surfaced to the operator: invalid
/// edits are rejected up front, external collaborator failures are reported
/// verbatim, and the staged batch is left untouched in every failure path.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StagingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
