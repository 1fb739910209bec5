//! Typed field edits and record reconciliation.

use crate::error::{ApiError, StoreError};
use crate::profile::{DistanceUnit, NotificationChannel, ProfileField, ProfileRecord};
use serde::Serialize;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

const NOTIFICATION_PREFIX: &str = "notification_";

/// A single user edit, targeting either a validated text field, a notification
/// preference, or one of the display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Field(ProfileField, String),
    Preference(NotificationChannel, bool),
    Language(String),
    Currency(String),
    DistanceUnit(DistanceUnit),
}

impl FieldEdit {
    /// Parse a form-level `(name, value)` pair, e.g. `("postalCode", "0157")` or
    /// `("notification_sms", "true")`.
    pub fn parse(name: &str, value: &str) -> Result<Self, ApiError> {
        if let Some(channel) = name.strip_prefix(NOTIFICATION_PREFIX) {
            let channel = match channel {
                "email" => NotificationChannel::Email,
                "push" => NotificationChannel::Push,
                "sms" => NotificationChannel::Sms,
                other => {
                    return Err(ApiError::InvalidInput(format!(
                        "Unknown notification channel: {}",
                        other
                    )))
                }
            };
            let enabled = value.parse::<bool>().map_err(|_| {
                ApiError::InvalidInput(format!(
                    "Notification preference must be 'true' or 'false', got '{}'",
                    value
                ))
            })?;
            return Ok(FieldEdit::Preference(channel, enabled));
        }

        match name {
            "country" => Err(ApiError::InvalidInput(
                "country cannot be changed".to_string(),
            )),
            "language" => Ok(FieldEdit::Language(value.to_string())),
            "currency" => Ok(FieldEdit::Currency(value.to_string())),
            "distanceUnit" => Ok(FieldEdit::DistanceUnit(value.parse()?)),
            other => Ok(FieldEdit::Field(other.parse()?, value.to_string())),
        }
    }

    /// The validated field whose stored error an edit invalidates, if any.
    pub fn field(&self) -> Option<ProfileField> {
        match self {
            FieldEdit::Field(field, _) => Some(*field),
            _ => None,
        }
    }
}

/// Result of applying an edit: the updated record and the field whose stored
/// error should be cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditApplied {
    pub record: ProfileRecord,
    pub clear_error: Option<ProfileField>,
}

/// Apply exactly one edit. Validation is not re-run.
pub fn apply_field_edit(mut record: ProfileRecord, edit: FieldEdit) -> EditApplied {
    let clear_error = edit.field();
    match edit {
        FieldEdit::Field(field, value) => {
            let normalized: String = value.nfc().collect();
            let stored = if field.is_optional() && normalized.trim().is_empty() {
                None
            } else {
                Some(normalized)
            };
            debug!(field = field.as_str(), "Applied field edit");
            record.set_text(field, stored);
        }
        FieldEdit::Preference(channel, enabled) => {
            debug!(channel = channel.as_str(), enabled, "Applied preference edit");
            record.notification_preferences.set(channel, enabled);
        }
        FieldEdit::Language(language) => record.language = language,
        FieldEdit::Currency(currency) => record.currency = currency,
        FieldEdit::DistanceUnit(unit) => record.distance_unit = unit,
    }
    EditApplied {
        record,
        clear_error,
    }
}

/// Store operation a general error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Fetch,
    Submit,
}

impl Operation {
    fn unexpected_message(&self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to load profile data. Please try again.",
            Operation::Submit => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Form-level, non-field-keyed failure shown as a single banner message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralError {
    pub operation: Operation,
    pub message: String,
}

impl GeneralError {
    /// Convert a store failure into a displayable message. Messages the store
    /// reported itself are kept; anything else is logged and replaced with a
    /// generic message.
    pub fn from_store(operation: Operation, err: &StoreError) -> Self {
        let message = match err {
            StoreError::Rejected(msg) => msg.clone(),
            other => {
                warn!(operation = ?operation, error = %other, "Unexpected profile store failure");
                operation.unexpected_message().to_string()
            }
        };
        Self { operation, message }
    }
}

impl std::fmt::Display for GeneralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Reconcile a fetch result with the default record: fetched data wins; on
/// failure the default is kept and a general error is produced. A user with no
/// stored profile yet keeps the default without an error.
pub fn merge_fetched_profile(
    default: ProfileRecord,
    fetched: Result<ProfileRecord, StoreError>,
) -> (ProfileRecord, Option<GeneralError>) {
    match fetched {
        Ok(record) => (record, None),
        Err(StoreError::NotFound(user_id)) => {
            debug!(user_id = %user_id, "No stored profile, starting from defaults");
            (default, None)
        }
        Err(e) => (default, Some(GeneralError::from_store(Operation::Fetch, &e))),
    }
}
