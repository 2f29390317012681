// fieldmask/tests/cli_integration_tests.rs
//! Command-line integration tests for the `fieldmask` binary.
//!
//! Each test builds an isolated configuration root in a temp dir, writes a
//! profile to `<root>/config/profiles/`, and runs the binary with its working
//! directory inside the temp dir so no stray `.env` file is picked up.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SECRET: &str = "cli-tests-secret-key-base-0123456789";

const PROFILE: &str = r#"
Contact:
  email: hash
  phone: suppress
  addresses:
    street: suppress
"#;

fn config_root_with(profile: Option<&str>) -> Result<TempDir> {
    let dir = TempDir::new()?;
    let profiles = dir.path().join("config").join("profiles");
    fs::create_dir_all(&profiles)?;
    if let Some(yaml) = profile {
        fs::write(profiles.join("connec_sanitizer_profile.yml"), yaml)?;
    }
    Ok(dir)
}

fn fieldmask(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fieldmask").unwrap();
    cmd.current_dir(root);
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("FIELDMASK_CONFIG_ROOT");
    cmd.env_remove("FIELDMASK_PROFILE");
    cmd.env_remove("SECRET_KEY_BASE");
    cmd.env("FIELDMASK_SECRET_KEY_BASE", SECRET);
    cmd.arg("--config-root").arg(root);
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn sanitizes_a_record_from_stdin() -> Result<()> {
    let root = config_root_with(Some(PROFILE))?;
    let input = json!({
        "email": "jane@example.com",
        "phone": "555-0100",
        "addresses": [{ "street": "1 Main St", "city": "Springfield" }],
        "id": 9
    });

    let output = fieldmask(root.path())
        .args(["sanitize", "--entity", "contact"])
        .write_stdin(input.to_string())
        .assert()
        .success()
        .get_output()
        .clone();

    let out = stdout_json(&output);
    assert_eq!(out["phone"], Value::Null);
    assert_eq!(out["id"], json!(9));
    assert_eq!(out["addresses"][0]["street"], Value::Null);
    assert_eq!(out["addresses"][0]["city"], json!("Springfield"));
    assert!(out["email"].is_string());
    assert_ne!(out["email"], input["email"]);
    Ok(())
}

#[test]
fn hash_command_matches_sanitized_digest() -> Result<()> {
    let root = config_root_with(Some(PROFILE))?;

    let output = fieldmask(root.path())
        .args(["sanitize", "-e", "Contact"])
        .write_stdin(r#"{"email":"jane@example.com"}"#)
        .assert()
        .success()
        .get_output()
        .clone();
    let digest = stdout_json(&output)["email"].as_str().expect("digest").to_string();

    fieldmask(root.path())
        .args(["hash", "jane@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", digest)));
    Ok(())
}

#[test]
fn passes_records_through_without_a_profile() -> Result<()> {
    let root = config_root_with(None)?;
    let input = json!([{ "email": "jane@example.com" }, { "phone": "555" }]);

    let output = fieldmask(root.path())
        .args(["sanitize", "--entity", "contact"])
        .write_stdin(input.to_string())
        .assert()
        .success()
        .stderr(predicate::str::contains("No sanitizer profile found"))
        .get_output()
        .clone();

    assert_eq!(stdout_json(&output), input);
    Ok(())
}

#[test]
fn malformed_profile_writes_nothing_and_fails() -> Result<()> {
    let root = config_root_with(Some("contact: [never closed\n"))?;

    fieldmask(root.path())
        .args(["sanitize", "--entity", "contact"])
        .write_stdin(r#"{"phone":"555-0100"}"#)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error masking data"))
        .stderr(predicate::str::contains("no output was written"))
        .stderr(predicate::str::contains("555-0100").not());
    Ok(())
}

#[test]
fn incompatible_shape_fails_closed() -> Result<()> {
    let root = config_root_with(Some(PROFILE))?;

    fieldmask(root.path())
        .args(["sanitize", "--entity", "contact"])
        .write_stdin(r#"{"addresses":"1 Main St","phone":"555-0100"}"#)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn yaml_file_in_yaml_file_out() -> Result<()> {
    let root = config_root_with(Some(PROFILE))?;
    let input_path = root.path().join("contact.yaml");
    let output_path = root.path().join("out.yaml");
    fs::write(&input_path, "phone: 555-0100\nname: Jane\n")?;

    fieldmask(root.path())
        .args(["sanitize", "-e", "Contact", "--format", "yaml", "-q"])
        .arg("-i")
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: Value = serde_yaml::from_str(&fs::read_to_string(&output_path)?)?;
    assert_eq!(written, json!({ "phone": null, "name": "Jane" }));
    Ok(())
}

#[test]
fn diff_is_printed_to_stderr() -> Result<()> {
    let root = config_root_with(Some(PROFILE))?;

    fieldmask(root.path())
        .args(["sanitize", "--entity", "contact", "--diff"])
        .write_stdin(r#"{"phone":"555-0100","id":1}"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("--- Diff View ---"))
        .stderr(predicate::str::contains("-  \"phone\": \"555-0100\""))
        .stderr(predicate::str::contains("+  \"phone\": null"));
    Ok(())
}

#[test]
fn profiles_show_prints_canonical_profile() -> Result<()> {
    let root = config_root_with(Some(PROFILE))?;

    fieldmask(root.path())
        .args(["profiles", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contact:"))
        .stdout(predicate::str::contains("email: hash"))
        .stdout(predicate::str::contains("phone: suppress"));
    Ok(())
}

#[test]
fn profiles_validate_reports_success_and_failure() -> Result<()> {
    let good = config_root_with(Some(PROFILE))?;
    fieldmask(good.path())
        .args(["profiles", "validate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("is valid: 1 entities (contact)"));

    let bad = config_root_with(Some("- not\n- a mapping\n"))?;
    fieldmask(bad.path())
        .args(["profiles", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is invalid"));

    let missing = config_root_with(None)?;
    fieldmask(missing.path())
        .args(["profiles", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sanitizer profile found"));
    Ok(())
}

#[test]
fn hash_without_secret_fails() -> Result<()> {
    let root = config_root_with(None)?;
    fieldmask(root.path())
        .env_remove("FIELDMASK_SECRET_KEY_BASE")
        .args(["hash", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No secret_key_base configured"));
    Ok(())
}

#[test]
fn settings_file_selects_profile() -> Result<()> {
    let root = config_root_with(None)?;
    let profiles = root.path().join("config").join("profiles");
    fs::write(profiles.join("custom.yml"), "contact:\n  phone: suppress\n")?;
    let settings = root.path().join("fieldmask.yaml");
    fs::write(&settings, "profile: custom.yml\n")?;

    let output = fieldmask(root.path())
        .arg("--config")
        .arg(&settings)
        .args(["sanitize", "--entity", "contact"])
        .write_stdin(r#"{"phone":"555"}"#)
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(stdout_json(&output), json!({ "phone": null }));
    Ok(())
}
