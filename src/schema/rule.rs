//! Per-field rules: required or optional, each carrying a format.

use crate::schema::format::Format;

#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Must be present and non-blank, and match the format.
    Required(Format),
    /// Skipped entirely when absent or empty; otherwise must match the format.
    OptionalWithFormat(Format),
}

impl FieldRule {
    /// Evaluate the rule against the field's current value.
    pub fn check(&self, value: Option<&str>) -> bool {
        match self {
            FieldRule::Required(format) => match value {
                Some(v) if !v.trim().is_empty() => format.matches(v),
                _ => false,
            },
            FieldRule::OptionalWithFormat(format) => match value {
                None | Some("") => true,
                Some(v) => format.matches(v),
            },
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, FieldRule::Required(_))
    }
}
