//! CLI presentation: text and json formatters per command family.

mod profile;
mod rewards;

use crate::error::ApiError;
use serde::Serialize;

pub use profile::{
    format_field_errors, format_profile_json, format_profile_text, format_submit_outcome,
    format_validation_json, format_validation_text,
};
pub use rewards::{format_claim_receipt, format_rewards_json, format_rewards_text};

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize output: {}", e)))
}
