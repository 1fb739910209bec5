//! The profile record edited by a form session.

use crate::profile::field::ProfileField;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNTRY: &str = "South Africa";

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_CURRENCY: &str = "ZAR";

/// Notification channels a user can opt in or out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Push,
    Sms,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Push => "push",
            NotificationChannel::Sms => "sms",
        }
    }
}

/// Independent per-channel notification flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: false,
            sms: false,
        }
    }
}

impl NotificationPreferences {
    pub fn get(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Email => self.email,
            NotificationChannel::Push => self.push,
            NotificationChannel::Sms => self.sms,
        }
    }

    /// Set one channel, leaving the others untouched.
    pub fn set(&mut self, channel: NotificationChannel, enabled: bool) {
        match channel {
            NotificationChannel::Email => self.email = enabled,
            NotificationChannel::Push => self.push = enabled,
            NotificationChannel::Sms => self.sms = enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Mi,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Mi => "mi",
        }
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = crate::error::ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "km" => Ok(DistanceUnit::Km),
            "mi" => Ok(DistanceUnit::Mi),
            other => Err(crate::error::ApiError::InvalidInput(format!(
                "Invalid distance unit: {} (must be 'km' or 'mi')",
                other
            ))),
        }
    }
}

/// Account, location and notification data of one user.
///
/// Optional fields use `None` for "not provided"; an empty string is treated
/// the same way by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub alternative_email: Option<String>,
    pub country: String,
    pub language: String,
    pub currency: String,
    pub distance_unit: DistanceUnit,
    pub notification_preferences: NotificationPreferences,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self::for_country(DEFAULT_COUNTRY)
    }
}

impl ProfileRecord {
    /// Empty record with the fixed initial values for a deployment country.
    pub fn for_country(country: &str) -> Self {
        Self {
            display_name: None,
            avatar_url: None,
            phone: None,
            address: String::new(),
            city: String::new(),
            province: String::new(),
            postal_code: String::new(),
            alternative_email: None,
            country: country.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            distance_unit: DistanceUnit::default(),
            notification_preferences: NotificationPreferences::default(),
        }
    }

    /// Current text of a field; `None` for an absent optional field.
    pub fn text(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::DisplayName => self.display_name.as_deref(),
            ProfileField::AvatarUrl => self.avatar_url.as_deref(),
            ProfileField::Phone => self.phone.as_deref(),
            ProfileField::Address => Some(&self.address),
            ProfileField::City => Some(&self.city),
            ProfileField::Province => Some(&self.province),
            ProfileField::PostalCode => Some(&self.postal_code),
            ProfileField::AlternativeEmail => self.alternative_email.as_deref(),
        }
    }

    /// Replace a field's text. `None` clears an optional field and empties a required one.
    pub fn set_text(&mut self, field: ProfileField, value: Option<String>) {
        match field {
            ProfileField::DisplayName => self.display_name = value,
            ProfileField::AvatarUrl => self.avatar_url = value,
            ProfileField::Phone => self.phone = value,
            ProfileField::Address => self.address = value.unwrap_or_default(),
            ProfileField::City => self.city = value.unwrap_or_default(),
            ProfileField::Province => self.province = value.unwrap_or_default(),
            ProfileField::PostalCode => self.postal_code = value.unwrap_or_default(),
            ProfileField::AlternativeEmail => self.alternative_email = value,
        }
    }
}
