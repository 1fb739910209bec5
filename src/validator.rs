//! Profile form validation.
//!
//! Validation is a pure function of the record: failures are returned as a
//! field-keyed map of messages, never raised as errors.

use crate::error::ApiError;
use crate::profile::{ProfileField, ProfileRecord};
use crate::schema::{LocaleConfig, ProfileSchema};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One message per invalid field. Fields absent from the map are valid.
pub type FieldErrors = BTreeMap<ProfileField, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "errors", rename_all = "lowercase")]
pub enum ValidationOutcome {
    Valid,
    Invalid(FieldErrors),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Field errors; empty when valid.
    pub fn errors(&self) -> FieldErrors {
        match self {
            ValidationOutcome::Valid => FieldErrors::new(),
            ValidationOutcome::Invalid(errors) => errors.clone(),
        }
    }

    pub fn into_errors(self) -> FieldErrors {
        match self {
            ValidationOutcome::Valid => FieldErrors::new(),
            ValidationOutcome::Invalid(errors) => errors,
        }
    }
}

/// Decides whether a profile record may be submitted.
#[derive(Debug, Clone)]
pub struct ProfileFormValidator {
    schema: ProfileSchema,
}

impl ProfileFormValidator {
    pub fn new(schema: ProfileSchema) -> Self {
        Self { schema }
    }

    pub fn for_locale(locale: &LocaleConfig) -> Result<Self, ApiError> {
        Ok(Self::new(ProfileSchema::for_locale(locale)?))
    }

    pub fn schema(&self) -> &ProfileSchema {
        &self.schema
    }

    /// Validate every field of the record independently.
    pub fn validate(&self, record: &ProfileRecord) -> ValidationOutcome {
        let errors: FieldErrors = self
            .schema
            .specs()
            .iter()
            .filter(|spec| !spec.rule.check(record.text(spec.field)))
            .map(|spec| (spec.field, spec.message.clone()))
            .collect();

        if errors.is_empty() {
            debug!("Profile record is valid");
            ValidationOutcome::Valid
        } else {
            debug!(
                invalid_fields = ?errors.keys().map(|f| f.as_str()).collect::<Vec<_>>(),
                "Profile record failed validation"
            );
            ValidationOutcome::Invalid(errors)
        }
    }

    /// Validate a single field; returns its message when invalid.
    pub fn validate_field(&self, record: &ProfileRecord, field: ProfileField) -> Option<&str> {
        let spec = self.schema.spec(field)?;
        if spec.rule.check(record.text(field)) {
            None
        } else {
            Some(spec.message.as_str())
        }
    }
}
