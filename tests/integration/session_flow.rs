//! Form session flows against the in-memory store

use profile_form::config::{LocaleConfig, SessionConfig};
use profile_form::edit::Operation;
use profile_form::profile::NotificationChannel;
use profile_form::session::FetchApplied;
use profile_form::store::InMemoryProfileStore;
use profile_form::{
    FieldEdit, FormSession, ProfileField, ProfileFormValidator, ProfileRecord, StoreError,
    SubmissionState, SubmitOutcome, UserIdentity,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn new_session(store: Arc<InMemoryProfileStore>, success_display_ms: u64) -> FormSession {
    FormSession::new(
        UserIdentity::new("user-42", "sipho", "sipho@example.co.za"),
        store,
        ProfileFormValidator::for_locale(&LocaleConfig::default()).unwrap(),
        SessionConfig { success_display_ms },
    )
}

fn edit(session: &mut FormSession, name: &str, value: &str) {
    session.apply_edit(FieldEdit::parse(name, value).unwrap());
}

#[tokio::test]
async fn test_new_user_fills_in_profile_and_submits() {
    let store = Arc::new(InMemoryProfileStore::new());
    let mut session = new_session(store.clone(), 3000);

    assert_eq!(session.mount().await, FetchApplied::Applied);
    assert!(session.general_error().is_none(), "missing profile is not an error");
    assert_eq!(session.record(), &ProfileRecord::default());

    edit(&mut session, "displayName", "Sipho");
    edit(&mut session, "address", "7 Long Street");
    edit(&mut session, "city", "Cape Town");
    edit(&mut session, "province", "Western Cape");
    edit(&mut session, "postalCode", "8001");
    edit(&mut session, "notification_sms", "true");

    let outcome = session.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Succeeded(ref ack) if ack.user_id == "user-42"));

    let stored = store.get("user-42").unwrap();
    assert_eq!(&stored, session.record());
    assert_eq!(stored.display_name.as_deref(), Some("Sipho"));
    assert!(stored.notification_preferences.email);
    assert!(stored.notification_preferences.sms);
    assert!(!stored.notification_preferences.push);
}

#[tokio::test]
async fn test_only_missing_address_is_reported() {
    let store = Arc::new(InMemoryProfileStore::new());
    let mut session = new_session(store.clone(), 3000);
    session.mount().await;

    edit(&mut session, "city", "Durban");
    edit(&mut session, "province", "KwaZulu-Natal");
    edit(&mut session, "postalCode", "4001");

    match session.submit().await {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get(&ProfileField::Address).map(String::as_str),
                Some("Address is required")
            );
        }
        other => panic!("expected invalid outcome, got {:?}", other),
    }
    assert_eq!(store.update_calls(), 0);
    assert_eq!(session.state(), SubmissionState::Idle);

    edit(&mut session, "address", "1 Marine Parade");
    assert!(session.field_errors().is_empty());
    assert!(matches!(
        session.submit().await,
        SubmitOutcome::Succeeded(_)
    ));
}

#[tokio::test]
async fn test_rejected_fetch_message_is_shown_verbatim() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.fail_next_fetch(StoreError::Rejected("Account suspended".to_string()));
    let mut session = new_session(store, 3000);
    session.mount().await;

    let err = session.general_error().unwrap();
    assert_eq!(err.operation, Operation::Fetch);
    assert_eq!(err.message, "Account suspended");
}

#[tokio::test]
async fn test_unauthenticated_fetch_uses_generic_message() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.fail_next_fetch(StoreError::Unauthenticated("token expired".to_string()));
    let mut session = new_session(store, 3000);
    session.mount().await;

    assert_eq!(
        session.general_error().map(|e| e.message.as_str()),
        Some("Failed to load profile data. Please try again.")
    );
    assert_eq!(session.record().country, "South Africa");
}

#[test]
fn test_late_fetch_failure_after_edit_keeps_edits() {
    let mut session = new_session(Arc::new(InMemoryProfileStore::new()), 3000);
    let ticket = session.begin_fetch();
    edit(&mut session, "city", "Bloemfontein");

    let applied = session.complete_fetch(
        ticket,
        Err(StoreError::Unavailable("connection reset".to_string())),
    );
    assert_eq!(applied, FetchApplied::IgnoredAfterEdit);
    assert_eq!(session.record().city, "Bloemfontein");
    assert!(session.general_error().is_some());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_preference_edit_keeps_siblings_and_errors() {
    let store = Arc::new(InMemoryProfileStore::new());
    let mut session = new_session(store, 3000);
    session.mount().await;
    assert!(!session.validate());
    let errors_before = session.field_errors().clone();

    session.apply_edit(FieldEdit::Preference(NotificationChannel::Push, true));
    let prefs = session.record().notification_preferences;
    assert!(prefs.email);
    assert!(prefs.push);
    assert!(!prefs.sms);
    assert_eq!(session.field_errors(), &errors_before);
}

#[tokio::test]
async fn test_success_banner_uses_configured_delay() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.insert(
        "user-42",
        ProfileRecord {
            address: "3 Jan Smuts Avenue".to_string(),
            city: "Johannesburg".to_string(),
            province: "Gauteng".to_string(),
            postal_code: "2196".to_string(),
            ..ProfileRecord::default()
        },
    );
    let mut session = new_session(store, 500);
    session.mount().await;
    assert!(matches!(
        session.submit().await,
        SubmitOutcome::Succeeded(_)
    ));

    let now = Instant::now();
    assert_eq!(
        session.refresh(now + Duration::from_millis(100)),
        SubmissionState::Succeeded
    );
    assert_eq!(
        session.refresh(now + Duration::from_millis(600)),
        SubmissionState::Idle
    );
}
