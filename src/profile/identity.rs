//! Authenticated account identity.

use serde::{Deserialize, Serialize};

/// The signed-in account a form session edits on behalf of.
///
/// Passed explicitly to sessions and stores; `username` and `email` are shown
/// read-only and never edited through the profile form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}
