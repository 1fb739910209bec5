//! Integration tests for the configuration system

use crate::integration::test_utils::with_isolated_home;
use profile_form::config::{ConfigLoader, StorageBackend};
use profile_form::profile::ProfileField;
use profile_form::{ProfileFormValidator, ProfileRecord, ValidationOutcome};
use tempfile::TempDir;

fn write_workspace_file(workspace: &std::path::Path, name: &str, content: &str) {
    let dir = workspace.join("config");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_environment_overrides_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write_workspace_file(&workspace, "config.toml", "[session]\nsuccess_display_ms = 2000\n");

    let config = with_isolated_home(&test_dir, || {
        std::env::set_var("PROFILE_FORM__SESSION__SUCCESS_DISPLAY_MS", "1200");
        ConfigLoader::load(&workspace).unwrap()
    });
    assert_eq!(config.session.success_display_ms, 1200);
}

#[test]
fn test_environment_named_file_overrides_base_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write_workspace_file(
        &workspace,
        "config.toml",
        "[storage]\nbackend = \"sled\"\nstore_path = \"data/profiles\"\n",
    );
    write_workspace_file(
        &workspace,
        "staging.toml",
        "[storage]\nbackend = \"http\"\nbase_url = \"https://staging.example.com/api\"\n",
    );

    let config = with_isolated_home(&test_dir, || {
        std::env::set_var("PROFILE_FORM_ENV", "staging");
        ConfigLoader::load(&workspace).unwrap()
    });
    assert_eq!(config.storage.backend, StorageBackend::Http);
    assert_eq!(
        config.storage.base_url.as_deref(),
        Some("https://staging.example.com/api")
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_locale_from_config_drives_validation() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("namibia.toml");
    std::fs::write(
        &config_file,
        r#"
[locale]
country = "Namibia"
phone_pattern = '^(\+264|0)[0-9]{8,9}$'
phone_message = "Please enter a valid Namibian phone number"
postal_code_pattern = '^\d{5}$'
postal_code_message = "Namibian postal codes must be 5 digits"
provinces = ["Erongo", "Khomas", "Oshana"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());
    let validator = ProfileFormValidator::for_locale(&config.locale).unwrap();

    let mut record = ProfileRecord::for_country("Namibia");
    record.address = "4 Independence Avenue".to_string();
    record.city = "Windhoek".to_string();
    record.province = "Khomas".to_string();
    record.postal_code = "10005".to_string();
    record.phone = Some("0811234567".to_string());
    assert_eq!(validator.validate(&record), ValidationOutcome::Valid);

    record.province = "Gauteng".to_string();
    record.postal_code = "0157".to_string();
    let errors = validator.validate(&record).into_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.get(&ProfileField::PostalCode).map(String::as_str),
        Some("Namibian postal codes must be 5 digits")
    );
    assert!(errors.contains_key(&ProfileField::Province));
}

#[test]
fn test_bad_locale_pattern_fails_validation() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("broken.toml");
    std::fs::write(&config_file, "[locale]\npostal_code_pattern = '(\\d{4}'\n").unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().starts_with("Locale:"));
    assert!(ProfileFormValidator::for_locale(&config.locale).is_err());
}
