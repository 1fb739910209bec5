//! Declarative profile schema.
//!
//! Each validated field carries one [`FieldRule`] and one human-readable
//! message. The rule table is data, so it can be built per locale and tested on
//! its own, independently of any form session.

pub mod format;
pub mod locale;
pub mod rule;

pub use format::Format;
pub use locale::LocaleConfig;
pub use rule::FieldRule;

use crate::error::ApiError;
use crate::profile::ProfileField;
use format::anchored;

pub const MIN_DISPLAY_NAME_CHARS: usize = 2;

/// Rule and message for one field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: ProfileField,
    pub rule: FieldRule,
    pub message: String,
}

impl FieldSpec {
    fn new(field: ProfileField, rule: FieldRule, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }
}

/// Ordered rule table covering every [`ProfileField`].
#[derive(Debug, Clone)]
pub struct ProfileSchema {
    specs: Vec<FieldSpec>,
    country: String,
}

impl ProfileSchema {
    /// Build the rule table for a locale. Fails when a locale pattern does not compile.
    pub fn for_locale(locale: &LocaleConfig) -> Result<Self, ApiError> {
        let phone = anchored(&locale.phone_pattern)
            .map_err(|e| ApiError::ConfigError(format!("Invalid phone pattern: {}", e)))?;
        let postal_code = anchored(&locale.postal_code_pattern)
            .map_err(|e| ApiError::ConfigError(format!("Invalid postal code pattern: {}", e)))?;

        let specs = vec![
            FieldSpec::new(
                ProfileField::DisplayName,
                FieldRule::OptionalWithFormat(Format::MinChars(MIN_DISPLAY_NAME_CHARS)),
                "Display name must be at least 2 characters",
            ),
            FieldSpec::new(
                ProfileField::AvatarUrl,
                FieldRule::OptionalWithFormat(Format::Url),
                "Please enter a valid URL",
            ),
            FieldSpec::new(
                ProfileField::Phone,
                FieldRule::OptionalWithFormat(Format::Pattern(phone)),
                locale.phone_message.clone(),
            ),
            FieldSpec::new(
                ProfileField::Address,
                FieldRule::Required(Format::NonEmpty),
                "Address is required",
            ),
            FieldSpec::new(
                ProfileField::City,
                FieldRule::Required(Format::NonEmpty),
                "City is required",
            ),
            FieldSpec::new(
                ProfileField::Province,
                FieldRule::Required(Format::OneOf(locale.provinces.clone())),
                "Province is required",
            ),
            FieldSpec::new(
                ProfileField::PostalCode,
                FieldRule::Required(Format::Pattern(postal_code)),
                locale.postal_code_message.clone(),
            ),
            FieldSpec::new(
                ProfileField::AlternativeEmail,
                FieldRule::OptionalWithFormat(Format::Email),
                "Please enter a valid email address",
            ),
        ];

        Ok(Self {
            specs,
            country: locale.country.clone(),
        })
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    pub fn spec(&self, field: ProfileField) -> Option<&FieldSpec> {
        self.specs.iter().find(|spec| spec.field == field)
    }

    /// Fixed country this schema was built for.
    pub fn country(&self) -> &str {
        &self.country
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ProfileSchema {
        ProfileSchema::for_locale(&LocaleConfig::default()).unwrap()
    }

    #[test]
    fn test_schema_covers_every_field_once() {
        let schema = schema();
        assert_eq!(schema.specs().len(), ProfileField::ALL.len());
        for field in ProfileField::ALL {
            let spec = schema.spec(field).unwrap();
            assert_eq!(spec.rule.is_required(), !field.is_optional());
        }
    }

    #[test]
    fn test_rule_table_messages() {
        let schema = schema();
        assert_eq!(
            schema.spec(ProfileField::Phone).unwrap().message,
            "Please enter a valid South African phone number"
        );
        assert_eq!(
            schema.spec(ProfileField::PostalCode).unwrap().message,
            "South African postal codes must be 4 digits"
        );
    }

    #[test]
    fn test_locale_parameterizes_patterns() {
        let locale = LocaleConfig {
            country: "Namibia".to_string(),
            phone_pattern: r"(\+264|0)[0-9]{8,9}".to_string(),
            phone_message: "Please enter a valid Namibian phone number".to_string(),
            postal_code_pattern: r"\d{5}".to_string(),
            postal_code_message: "Namibian postal codes must be 5 digits".to_string(),
            provinces: vec!["Khomas".to_string(), "Erongo".to_string()],
        };
        let schema = ProfileSchema::for_locale(&locale).unwrap();
        assert_eq!(schema.country(), "Namibia");
        let postal = &schema.spec(ProfileField::PostalCode).unwrap().rule;
        assert!(postal.check(Some("10005")));
        assert!(!postal.check(Some("0157")));
        let province = &schema.spec(ProfileField::Province).unwrap().rule;
        assert!(province.check(Some("Khomas")));
        assert!(!province.check(Some("Gauteng")));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let locale = LocaleConfig {
            phone_pattern: "([0-9]".to_string(),
            ..LocaleConfig::default()
        };
        assert!(matches!(
            ProfileSchema::for_locale(&locale),
            Err(ApiError::ConfigError(_))
        ));
    }
}
