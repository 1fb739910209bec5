//! Profile command presentation: record, validation and submit results as text/json.

use crate::cli::presentation::to_json;
use crate::edit::GeneralError;
use crate::error::ApiError;
use crate::profile::{ProfileField, ProfileRecord, UserIdentity};
use crate::session::SubmitOutcome;
use crate::validator::{FieldErrors, ValidationOutcome};
use comfy_table::Table;
use serde_json::json;

fn field_label(field: ProfileField) -> &'static str {
    match field {
        ProfileField::DisplayName => "Display name",
        ProfileField::AvatarUrl => "Avatar URL",
        ProfileField::Phone => "Phone",
        ProfileField::Address => "Address",
        ProfileField::City => "City",
        ProfileField::Province => "Province",
        ProfileField::PostalCode => "Postal code",
        ProfileField::AlternativeEmail => "Alternative email",
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

pub fn format_profile_text(
    identity: &UserIdentity,
    record: &ProfileRecord,
    general_error: Option<&GeneralError>,
) -> String {
    let mut output = format!("Profile: {} ({})\n", identity.username, identity.user_id);
    if !identity.email.is_empty() {
        output.push_str(&format!("Email: {}\n", identity.email));
    }
    for field in ProfileField::ALL {
        let value = record.text(field).unwrap_or("");
        let shown = if value.is_empty() { "(not set)" } else { value };
        output.push_str(&format!("  {:<18} {}\n", format!("{}:", field_label(field)), shown));
    }
    output.push_str(&format!("  {:<18} {}\n", "Country:", record.country));
    output.push_str(&format!(
        "  {:<18} {} / {} / {}\n",
        "Display:", record.language, record.currency, record.distance_unit.as_str()
    ));
    let prefs = &record.notification_preferences;
    output.push_str(&format!(
        "  {:<18} email {}, push {}, sms {}",
        "Notifications:",
        on_off(prefs.email),
        on_off(prefs.push),
        on_off(prefs.sms)
    ));
    if let Some(err) = general_error {
        output.push_str(&format!("\n\nError: {}", err));
    }
    output
}

pub fn format_profile_json(
    identity: &UserIdentity,
    record: &ProfileRecord,
    general_error: Option<&GeneralError>,
) -> Result<String, ApiError> {
    to_json(&json!({
        "user": identity,
        "profile": record,
        "general_error": general_error,
    }))
}

/// Field errors as a two-column table, in form order.
pub fn format_field_errors(errors: &FieldErrors) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Field", "Problem"]);
    for (field, message) in errors {
        table.add_row(vec![field_label(*field), message.as_str()]);
    }
    table.to_string()
}

pub fn format_validation_text(outcome: &ValidationOutcome) -> String {
    match outcome {
        ValidationOutcome::Valid => "Profile is valid.".to_string(),
        ValidationOutcome::Invalid(errors) => format!(
            "Profile is invalid ({} field(s)):\n{}",
            errors.len(),
            format_field_errors(errors)
        ),
    }
}

pub fn format_validation_json(outcome: &ValidationOutcome) -> Result<String, ApiError> {
    to_json(outcome)
}

pub fn format_submit_outcome(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Invalid(errors) => format!(
            "Profile not submitted, please fix the following:\n{}",
            format_field_errors(errors)
        ),
        SubmitOutcome::Succeeded(ack) => format!(
            "Profile updated successfully for {} at {}",
            ack.user_id,
            ack.saved_at.to_rfc3339()
        ),
        SubmitOutcome::Failed(err) => format!("Error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_text_marks_unset_fields() {
        let identity = UserIdentity::new("u-1", "thandi", "");
        let text = format_profile_text(&identity, &ProfileRecord::default(), None);
        assert!(text.starts_with("Profile: thandi (u-1)"));
        assert!(text.contains("(not set)"));
        assert!(text.contains("South Africa"));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_validation_text_lists_each_field_once() {
        let mut errors = FieldErrors::new();
        errors.insert(ProfileField::City, "City is required".to_string());
        errors.insert(ProfileField::Address, "Address is required".to_string());
        let text = format_validation_text(&ValidationOutcome::Invalid(errors));
        assert!(text.starts_with("Profile is invalid (2 field(s))"));
        assert!(text.find("Address").unwrap() < text.find("City").unwrap());
    }

    #[test]
    fn test_validation_json_shape() {
        let json = format_validation_json(&ValidationOutcome::Valid).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "valid");
    }
}
