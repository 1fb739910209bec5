//! Integration tests for the sled-backed profile store

use profile_form::config::{SessionConfig, StorageConfig};
use profile_form::schema::LocaleConfig;
use profile_form::store::{open_store, SledProfileStore};
use profile_form::{
    FieldEdit, FormSession, ProfileField, ProfileFormValidator, ProfileStore, SubmitOutcome,
    UserIdentity,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn identity() -> UserIdentity {
    UserIdentity::new("user-7", "lerato", "lerato@example.co.za")
}

#[tokio::test]
async fn test_submitted_profile_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let storage = StorageConfig {
        store_path: PathBuf::from("profiles"),
        ..StorageConfig::default()
    };

    {
        let store = open_store(&storage, temp_dir.path()).unwrap();
        assert_eq!(store.backend_name(), "sled");
        let mut session = FormSession::new(
            identity(),
            store,
            ProfileFormValidator::for_locale(&LocaleConfig::default()).unwrap(),
            SessionConfig::default(),
        );
        session.mount().await;
        assert!(session.general_error().is_none());
        for (field, value) in [
            (ProfileField::Address, "22 Oxford Road"),
            (ProfileField::City, "East London"),
            (ProfileField::Province, "Eastern Cape"),
            (ProfileField::PostalCode, "5201"),
            (ProfileField::AlternativeEmail, "l.mokoena@example.org"),
        ] {
            session.apply_edit(FieldEdit::Field(field, value.to_string()));
        }
        assert!(matches!(
            session.submit().await,
            SubmitOutcome::Succeeded(_)
        ));
    }

    let store = SledProfileStore::new(temp_dir.path().join("profiles")).unwrap();
    let stored = store.get("user-7").unwrap().unwrap();
    assert_eq!(stored.city, "East London");
    assert_eq!(
        stored.alternative_email.as_deref(),
        Some("l.mokoena@example.org")
    );
    assert_eq!(store.list_user_ids().unwrap(), vec!["user-7".to_string()]);
}

#[tokio::test]
async fn test_mount_reads_previously_stored_profile() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store");
    {
        let store = SledProfileStore::new(&path).unwrap();
        let mut record = profile_form::ProfileRecord::default();
        record.city = "Kimberley".to_string();
        record.notification_preferences.email = false;
        store.put("user-7", &record).unwrap();
    }

    let storage = StorageConfig {
        store_path: path,
        ..StorageConfig::default()
    };
    let store = open_store(&storage, temp_dir.path()).unwrap();
    let mut session = FormSession::new(
        identity(),
        store,
        ProfileFormValidator::for_locale(&LocaleConfig::default()).unwrap(),
        SessionConfig::default(),
    );
    session.mount().await;
    assert_eq!(session.record().city, "Kimberley");
    assert!(!session.record().notification_preferences.email);
}
