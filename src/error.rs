//! Error types for the profile form system.

use thiserror::Error;

/// Profile store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile not found for user: {0}")]
    NotFound(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// The store answered and refused the operation with its own message.
    #[error("{0}")]
    Rejected(String),

    #[error("Profile service unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed profile data: {0}")]
    Malformed(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Reward claim errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("Unknown reward: {0}")]
    UnknownReward(String),

    #[error("Reward already claimed: {0}")]
    AlreadyClaimed(String),

    #[error("You don't have enough points for this reward ({available} of {required})")]
    InsufficientPoints { required: u32, available: u32 },

    #[error("Reward expired on {expired_on}")]
    Expired { expired_on: chrono::NaiveDate },
}

/// Crate boundary errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),

    #[error("Claim failed: {0}")]
    ClaimError(#[from] ClaimError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
