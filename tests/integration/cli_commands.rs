//! End-to-end tests of the profile-form binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CATALOG: &str = r#"
points = 3450

[[rewards]]
id = "1"
title = "R50 Pick n Pay Voucher"
points_required = 2500
category = "discount"
retailer = "Pick n Pay"
expiry_date = "2024-03-31"

[[rewards]]
id = "2"
title = "Free Coffee at Woolworths Cafe"
points_required = 1000
category = "freebie"
claimed = true

[[rewards]]
id = "4"
title = "Early Access to Black Friday Deals"
points_required = 5000
category = "exclusive"

[[achievements]]
id = "1"
title = "Smart Shopper"
progress = 42
target = 50
reward = "500 points"
"#;

fn run(workspace: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_profile-form"))
        .arg("--workspace")
        .arg(workspace)
        .arg("--quiet")
        .args(args)
        .env("HOME", workspace.join("home"))
        .env_remove("PROFILE_FORM_ENV")
        .env_remove("PROFILE_FORM_LOG")
        .output()
        .expect("failed to run profile-form")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_validate_reports_field_errors_and_fails() {
    let temp = TempDir::new().unwrap();
    let record = temp.path().join("record.json");
    std::fs::write(
        &record,
        r#"{"city": "Pretoria", "province": "Gauteng", "postalCode": "015", "phone": "821234567"}"#,
    )
    .unwrap();

    let output = run(
        temp.path(),
        &["profile", "validate", "--file", record.to_str().unwrap(), "--format", "json"],
    );
    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["status"], "invalid");
    assert_eq!(value["errors"]["address"], "Address is required");
    assert_eq!(
        value["errors"]["postalCode"],
        "South African postal codes must be 4 digits"
    );
    assert_eq!(
        value["errors"]["phone"],
        "Please enter a valid South African phone number"
    );
    assert!(value["errors"].get("city").is_none());
}

#[test]
fn test_validate_accepts_valid_record() {
    let temp = TempDir::new().unwrap();
    let record = temp.path().join("record.json");
    std::fs::write(
        &record,
        r#"{"address": "1 Main Road", "city": "George", "province": "Western Cape", "postalCode": "6529"}"#,
    )
    .unwrap();

    let output = run(temp.path(), &["profile", "validate", "--file", record.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Profile is valid."));
}

#[test]
fn test_edit_then_show_round_trip_through_local_store() {
    let temp = TempDir::new().unwrap();
    let output = run(
        temp.path(),
        &[
            "profile", "edit", "--user", "u-9",
            "--set", "address=9 Voortrekker Road",
            "--set", "city=Polokwane",
            "--set", "province=Limpopo",
            "--set", "postalCode=0699",
            "--set", "notification_push=true",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Profile updated successfully for u-9"));
    assert!(temp.path().join(".profile-form").join("store").exists());

    let shown = run(temp.path(), &["profile", "show", "--user", "u-9", "--format", "json"]);
    assert!(shown.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&shown)).unwrap();
    assert_eq!(value["profile"]["city"], "Polokwane");
    assert_eq!(value["profile"]["notificationPreferences"]["push"], true);
    assert_eq!(value["profile"]["notificationPreferences"]["email"], true);
    assert!(value["general_error"].is_null());
}

#[test]
fn test_invalid_edit_is_not_submitted() {
    let temp = TempDir::new().unwrap();
    let output = run(
        temp.path(),
        &["profile", "edit", "--user", "u-3", "--set", "city=Mbombela"],
    );
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Profile not submitted"));
    assert!(text.contains("Address is required"));
    assert!(!text.contains("City is required"));
}

#[test]
fn test_edit_rejects_country_change() {
    let temp = TempDir::new().unwrap();
    let output = run(
        temp.path(),
        &["profile", "edit", "--user", "u-3", "--set", "country=Botswana"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("country cannot be changed"));
}

#[test]
fn test_rewards_show_and_claim() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("rewards.toml");
    std::fs::write(&catalog, CATALOG).unwrap();
    let catalog_arg = catalog.to_str().unwrap();

    let shown = run(
        temp.path(),
        &["rewards", "show", "--catalog", catalog_arg, "--format", "json", "--today", "2024-03-01"],
    );
    assert!(shown.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&shown)).unwrap();
    assert_eq!(value["points"], 3450);
    assert_eq!(value["claimable"], 1);
    assert_eq!(value["achievements"][0]["percent"], 84);

    let claimed = run(
        temp.path(),
        &["rewards", "claim", "1", "--catalog", catalog_arg, "--today", "2024-03-01"],
    );
    assert!(claimed.status.success());
    assert!(stdout(&claimed).contains("Remaining balance: 950"));

    let again = run(
        temp.path(),
        &["rewards", "claim", "1", "--catalog", catalog_arg, "--today", "2024-03-01"],
    );
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("Reward already claimed: 1"));

    let too_expensive = run(
        temp.path(),
        &["rewards", "claim", "4", "--catalog", catalog_arg, "--today", "2024-03-01"],
    );
    assert!(!too_expensive.status.success());
    let saved = std::fs::read_to_string(&catalog).unwrap();
    assert!(saved.contains("points = 950"));
}
