//! profile-form: user profile validation, editing and submission.
//!
//! A declarative, locale-configurable validator for profile records, a typed
//! edit model, a form session that drives the submission lifecycle against a
//! pluggable profile store, and the rewards ledger shown next to the profile.

pub mod cli;
pub mod config;
pub mod edit;
pub mod error;
pub mod logging;
pub mod profile;
pub mod rewards;
pub mod schema;
pub mod session;
pub mod store;
pub mod validator;

pub use edit::{apply_field_edit, merge_fetched_profile, FieldEdit, GeneralError, Operation};
pub use error::{ApiError, ClaimError, StoreError};
pub use profile::{ProfileField, ProfileRecord, UserIdentity};
pub use session::{FormSession, SubmissionState, SubmitOutcome};
pub use store::ProfileStore;
pub use validator::{FieldErrors, ProfileFormValidator, ValidationOutcome};
