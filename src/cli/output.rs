//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, StoreError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ConfigError(msg) => format!("Configuration error: {}", msg),
        ApiError::StorageError(StoreError::Rejected(msg)) => msg.clone(),
        ApiError::ClaimError(err) => err.to_string(),
        other => other.to_string(),
    }
}
