use serde::Serialize;
use thiserror::Error;

/// Error taxonomy for the inventory core.
///
/// Foreseeable bad input (negative quick-adjust targets, unknown item ids on
/// the quick path) never surfaces here; those operations degrade to silent
/// no-ops. Errors are reserved for guarded deletes, name collisions and
/// external-service failures, where the caller needs a message to show.
#[derive(Error, Debug, Serialize, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
