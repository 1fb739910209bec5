//! Configuration System
//!
//! Layered configuration for locale rules, session timing, storage backend and
//! logging. Supports a global file, workspace files, environment overrides and
//! validation of the merged result.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use crate::schema::LocaleConfig;
pub use crate::session::SessionConfig;
pub use crate::store::{StorageBackend, StorageConfig};
pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    /// Locale rules (country, phone/postal patterns, provinces)
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Form session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Profile store settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Locale(String),
    Session(String),
    Storage(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Locale(msg) => write!(f, "Locale: {}", msg),
            ValidationError::Session(msg) => write!(f, "Session: {}", msg),
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FormConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.locale.validate() {
            errors.push(ValidationError::Locale(e));
        }
        if let Err(e) = self.session.validate() {
            errors.push(ValidationError::Session(e));
        }
        if let Err(e) = self.storage.validate() {
            errors.push(ValidationError::Storage(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
