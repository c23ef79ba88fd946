use super::*;

use std::{collections::HashMap, io::Write};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn missing_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(&dir.path().join("absent.toml")).expect("settings");
    assert_eq!(settings.request_timeout_secs, Settings::default().request_timeout_secs);
}

#[test]
fn file_values_override_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "store_url = \"https://store.example.com/api\"").expect("write");
    writeln!(file, "subject_id = \"u-42\"").expect("write");
    writeln!(file, "request_timeout_secs = 3").expect("write");

    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        &fs::read_to_string(file.path()).expect("read back"),
    )
    .expect("parse");

    assert_eq!(settings.store_url, "https://store.example.com/api");
    assert_eq!(settings.subject_id.as_deref(), Some("u-42"));
    assert_eq!(settings.request_timeout_secs, 3);
}

#[test]
fn malformed_file_is_reported_with_its_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "store_url = [").expect("write");

    let err = load_settings(file.path()).expect_err("must fail");
    assert!(
        err.to_string().contains("invalid config file"),
        "unexpected error: {err}"
    );
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("DASHBOARD_STORE_URL", "http://legacy:1"),
            ("APP__STORE_URL", "http://preferred:2"),
            ("APP__SUBJECT_ID", "u-7"),
        ]),
    );
    assert_eq!(settings.store_url, "http://preferred:2");
    assert_eq!(settings.subject_id.as_deref(), Some("u-7"));
}

#[test]
fn invalid_timeout_and_blank_subject_are_ignored() {
    let mut settings = Settings {
        subject_id: Some("from-file".to_string()),
        ..Settings::default()
    };
    apply_env(
        &mut settings,
        env(&[("APP__REQUEST_TIMEOUT_SECS", "soon"), ("APP__SUBJECT_ID", " ")]),
    );
    assert_eq!(settings.request_timeout_secs, 10);
    assert_eq!(settings.subject_id, None);

    apply_env(&mut settings, env(&[("APP__REQUEST_TIMEOUT_SECS", "0")]));
    assert_eq!(settings.request_timeout_secs, 10);
}
