//! Validated profile field names.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-editable, validated text field of a [`ProfileRecord`](super::ProfileRecord).
///
/// The ordering of the variants is the form's display order and is what keeps
/// field-keyed error maps deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    DisplayName,
    AvatarUrl,
    Phone,
    Address,
    City,
    Province,
    PostalCode,
    AlternativeEmail,
}

impl ProfileField {
    pub const ALL: [ProfileField; 8] = [
        ProfileField::DisplayName,
        ProfileField::AvatarUrl,
        ProfileField::Phone,
        ProfileField::Address,
        ProfileField::City,
        ProfileField::Province,
        ProfileField::PostalCode,
        ProfileField::AlternativeEmail,
    ];

    /// Form name of the field, as used in serialized records and error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::DisplayName => "displayName",
            ProfileField::AvatarUrl => "avatarUrl",
            ProfileField::Phone => "phone",
            ProfileField::Address => "address",
            ProfileField::City => "city",
            ProfileField::Province => "province",
            ProfileField::PostalCode => "postalCode",
            ProfileField::AlternativeEmail => "alternativeEmail",
        }
    }

    /// Whether the field may be left empty.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            ProfileField::DisplayName
                | ProfileField::AvatarUrl
                | ProfileField::Phone
                | ProfileField::AlternativeEmail
        )
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ApiError::InvalidInput(format!("Unknown profile field: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_names_round_trip_through_from_str() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>().unwrap(), field);
        }
        assert!("country".parse::<ProfileField>().is_err());
    }

    #[test]
    fn test_serde_name_matches_form_name() {
        let json = serde_json::to_string(&ProfileField::PostalCode).unwrap();
        assert_eq!(json, "\"postalCode\"");
    }

    #[test]
    fn test_optional_fields() {
        let optional: Vec<_> = ProfileField::ALL
            .iter()
            .filter(|f| f.is_optional())
            .map(|f| f.as_str())
            .collect();
        assert_eq!(
            optional,
            vec!["displayName", "avatarUrl", "phone", "alternativeEmail"]
        );
    }
}
