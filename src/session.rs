//! Form session: one profile record, its errors, and the submission lifecycle.
//!
//! A session owns its record exclusively. Edits go through [`FormSession::apply_edit`],
//! full validation happens only on [`FormSession::validate`] or
//! [`FormSession::submit`], and store failures are turned into a single
//! [`GeneralError`] here and nowhere else.

use crate::edit::{apply_field_edit, merge_fetched_profile, FieldEdit, GeneralError, Operation};
use crate::error::StoreError;
use crate::profile::{ProfileRecord, UserIdentity};
use crate::store::{Ack, ProfileStore};
use crate::validator::{FieldErrors, ProfileFormValidator, ValidationOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long a successful submission stays visible before reverting to idle
    #[serde(default = "default_success_display_ms")]
    pub success_display_ms: u64,
}

fn default_success_display_ms() -> u64 {
    3000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            success_display_ms: default_success_display_ms(),
        }
    }
}

impl SessionConfig {
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.success_display_ms == 0 {
            return Err("success_display_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Submission lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Idle,
    Validating,
    Valid,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Succeeded, Validating)
                | (Validating, Valid)
                | (Validating, Invalid)
                | (Valid, Submitting)
                | (Invalid, Idle)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }
}

/// Result of completing a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    /// Fetched record (or the default, on failure) is now the session record.
    Applied,
    /// The user edited the form after the fetch began; the response was dropped.
    IgnoredAfterEdit,
    /// A newer fetch was started; this response was dropped.
    Superseded,
}

/// Issued by [`FormSession::begin_fetch`]; identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    edits_at_issue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(FieldErrors),
    Succeeded(Ack),
    Failed(GeneralError),
}

pub struct FormSession {
    identity: UserIdentity,
    store: Arc<dyn ProfileStore>,
    validator: ProfileFormValidator,
    settings: SessionConfig,
    record: ProfileRecord,
    field_errors: FieldErrors,
    general_error: Option<GeneralError>,
    state: SubmissionState,
    loading: bool,
    fetch_generation: u64,
    edit_count: u64,
    succeeded_at: Option<Instant>,
}

impl FormSession {
    pub fn new(
        identity: UserIdentity,
        store: Arc<dyn ProfileStore>,
        validator: ProfileFormValidator,
        settings: SessionConfig,
    ) -> Self {
        let record = ProfileRecord::for_country(validator.schema().country());
        Self {
            identity,
            store,
            validator,
            settings,
            record,
            field_errors: FieldErrors::new(),
            general_error: None,
            state: SubmissionState::Idle,
            loading: false,
            fetch_generation: 0,
            edit_count: 0,
            succeeded_at: None,
        }
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn general_error(&self) -> Option<&GeneralError> {
        self.general_error.as_ref()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch the stored profile and reconcile it with the session record.
    /// Failures end up in [`general_error`](Self::general_error), never as an error here.
    pub async fn mount(&mut self) -> FetchApplied {
        let ticket = self.begin_fetch();
        let result = self.store.fetch(&self.identity).await;
        self.complete_fetch(ticket, result)
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        self.loading = true;
        debug!(
            user_id = %self.identity.user_id,
            generation = self.fetch_generation,
            "Profile fetch started"
        );
        FetchTicket {
            generation: self.fetch_generation,
            edits_at_issue: self.edit_count,
        }
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ProfileRecord, StoreError>,
    ) -> FetchApplied {
        if ticket.generation != self.fetch_generation {
            debug!(generation = ticket.generation, "Dropping superseded fetch response");
            return FetchApplied::Superseded;
        }
        self.loading = false;

        if ticket.edits_at_issue != self.edit_count {
            match result {
                Ok(_) => {
                    warn!(
                        user_id = %self.identity.user_id,
                        "Fetch response arrived after user edits; keeping edited record"
                    );
                }
                Err(StoreError::NotFound(_)) => {
                    debug!(
                        user_id = %self.identity.user_id,
                        "No stored profile; keeping edited record"
                    );
                }
                Err(e) => {
                    self.general_error = Some(GeneralError::from_store(Operation::Fetch, &e));
                }
            }
            return FetchApplied::IgnoredAfterEdit;
        }

        let default = std::mem::take(&mut self.record);
        let (record, general_error) = merge_fetched_profile(default, result);
        self.record = record;
        if let Some(err) = general_error {
            self.general_error = Some(err);
        } else {
            info!(user_id = %self.identity.user_id, "Profile loaded");
        }
        FetchApplied::Applied
    }

    /// Apply one user edit and clear that field's stored error.
    pub fn apply_edit(&mut self, edit: FieldEdit) {
        let record = std::mem::take(&mut self.record);
        let applied = apply_field_edit(record, edit);
        self.record = applied.record;
        if let Some(field) = applied.clear_error {
            self.field_errors.remove(&field);
        }
        self.edit_count += 1;
    }

    /// Run full validation, storing the field errors. Returns whether the record is valid.
    pub fn validate(&mut self) -> bool {
        let outcome = self.validator.validate(&self.record);
        let valid = outcome.is_valid();
        self.field_errors = outcome.into_errors();
        valid
    }

    /// Validate and, when valid, send a snapshot of the record to the store.
    ///
    /// Dropping the returned future while the store call is pending returns the
    /// session to `Idle`; the store may or may not have applied the update.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.refresh(Instant::now());
        self.general_error = None;
        self.transition(SubmissionState::Validating);

        match self.validator.validate(&self.record) {
            ValidationOutcome::Invalid(errors) => {
                self.field_errors = errors.clone();
                self.transition(SubmissionState::Invalid);
                self.transition(SubmissionState::Idle);
                SubmitOutcome::Invalid(errors)
            }
            ValidationOutcome::Valid => {
                self.field_errors.clear();
                self.transition(SubmissionState::Valid);
                self.transition(SubmissionState::Submitting);
                let snapshot = self.record.clone();
                let result = {
                    let in_flight = InFlight::enter(&mut self.state, &mut self.loading);
                    let result = self.store.update(&self.identity, &snapshot).await;
                    in_flight.settle();
                    result
                };
                match result {
                    Ok(ack) => {
                        info!(
                            user_id = %self.identity.user_id,
                            backend = self.store.backend_name(),
                            "Profile submitted"
                        );
                        self.succeeded_at = Some(Instant::now());
                        self.transition(SubmissionState::Succeeded);
                        SubmitOutcome::Succeeded(ack)
                    }
                    Err(e) => {
                        let general = GeneralError::from_store(Operation::Submit, &e);
                        self.general_error = Some(general.clone());
                        self.transition(SubmissionState::Failed);
                        self.transition(SubmissionState::Idle);
                        SubmitOutcome::Failed(general)
                    }
                }
            }
        }
    }

    /// Revert a shown success to idle once the display delay has passed.
    pub fn refresh(&mut self, now: Instant) -> SubmissionState {
        if self.state == SubmissionState::Succeeded {
            if let Some(at) = self.succeeded_at {
                if now.saturating_duration_since(at) >= self.settings.success_display() {
                    self.succeeded_at = None;
                    self.transition(SubmissionState::Idle);
                }
            }
        }
        self.state
    }

    fn transition(&mut self, next: SubmissionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid submission transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "Submission state");
        self.state = next;
    }
}

/// Marks the session loading for the duration of a store call.
struct InFlight<'a> {
    state: &'a mut SubmissionState,
    loading: &'a mut bool,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn enter(state: &'a mut SubmissionState, loading: &'a mut bool) -> Self {
        *loading = true;
        Self {
            state,
            loading,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.loading = false;
        if !self.settled {
            warn!("Submission dropped before the store responded");
            *self.state = SubmissionState::Idle;
        }
    }
}
