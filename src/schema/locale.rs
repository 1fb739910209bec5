//! Locale-specific parts of the profile schema.

use crate::profile::{DEFAULT_COUNTRY, PROVINCES};
use crate::schema::format::anchored;
use serde::{Deserialize, Serialize};

/// Country-dependent constants and patterns used to build a
/// [`ProfileSchema`](super::ProfileSchema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Fixed, non-editable country of the deployment
    #[serde(default = "default_country")]
    pub country: String,

    /// Phone number pattern, matched against the whole value
    #[serde(default = "default_phone_pattern")]
    pub phone_pattern: String,

    #[serde(default = "default_phone_message")]
    pub phone_message: String,

    /// Postal code pattern, matched against the whole value
    #[serde(default = "default_postal_code_pattern")]
    pub postal_code_pattern: String,

    #[serde(default = "default_postal_code_message")]
    pub postal_code_message: String,

    /// Allowed province/region names
    #[serde(default = "default_provinces")]
    pub provinces: Vec<String>,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_phone_pattern() -> String {
    r"^(\+27|0)[0-9]{9}$".to_string()
}

fn default_phone_message() -> String {
    "Please enter a valid South African phone number".to_string()
}

fn default_postal_code_pattern() -> String {
    r"^\d{4}$".to_string()
}

fn default_postal_code_message() -> String {
    "South African postal codes must be 4 digits".to_string()
}

fn default_provinces() -> Vec<String> {
    PROVINCES.iter().map(|p| p.to_string()).collect()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            phone_pattern: default_phone_pattern(),
            phone_message: default_phone_message(),
            postal_code_pattern: default_postal_code_pattern(),
            postal_code_message: default_postal_code_message(),
            provinces: default_provinces(),
        }
    }
}

impl LocaleConfig {
    /// Validate locale configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.country.trim().is_empty() {
            return Err("Country cannot be empty".to_string());
        }
        if let Err(e) = anchored(&self.phone_pattern) {
            return Err(format!("Invalid phone pattern: {}", e));
        }
        if let Err(e) = anchored(&self.postal_code_pattern) {
            return Err(format!("Invalid postal code pattern: {}", e));
        }
        if self.provinces.is_empty() {
            return Err("Province list cannot be empty".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for province in &self.provinces {
            if !seen.insert(province.as_str()) {
                return Err(format!("Duplicate province '{}'", province));
            }
        }
        Ok(())
    }
}
