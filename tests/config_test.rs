//! Tests for session configuration loading.

use roundabouts::{EventFormat, SessionConfig};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = SessionConfig::default();
    assert_eq!(*config.tick_interval_ms(), 500);
    assert_eq!(*config.animation_delay_ms(), 300);
    assert_eq!(*config.event_format(), EventFormat::Text);
    assert_eq!(config.tick_interval(), Duration::from_millis(500));
}

#[test]
fn test_from_file_reads_all_fields() {
    let file = config_file(
        r#"
tick_interval_ms = 120
animation_delay_ms = 40
event_format = "json"
"#,
    );

    let config = SessionConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.tick_interval_ms(), 120);
    assert_eq!(config.animation_delay(), Duration::from_millis(40));
    assert_eq!(*config.event_format(), EventFormat::Json);
}

#[test]
fn test_from_file_fills_missing_fields_with_defaults() {
    let file = config_file("tick_interval_ms = 250\n");

    let config = SessionConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.tick_interval_ms(), 250);
    assert_eq!(*config.animation_delay_ms(), 300);
    assert_eq!(*config.event_format(), EventFormat::Text);
}

#[test]
fn test_from_file_rejects_bad_toml() {
    let file = config_file("tick_interval_ms = \"fast\"\n");

    let err = SessionConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_zero_tick_is_rejected() {
    let file = config_file("tick_interval_ms = 0\n");
    assert!(SessionConfig::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(SessionConfig::from_file(&path).is_err());
    assert_eq!(
        SessionConfig::load_or_default(&path).unwrap(),
        SessionConfig::default()
    );
}

#[test]
fn test_tick_override() {
    let config = SessionConfig::default()
        .with_tick_override(Some(" 80 "))
        .unwrap();
    assert_eq!(*config.tick_interval_ms(), 80);

    let unchanged = SessionConfig::default().with_tick_override(None).unwrap();
    assert_eq!(unchanged, SessionConfig::default());

    let err = SessionConfig::default()
        .with_tick_override(Some("soon"))
        .unwrap_err();
    assert!(err.message.contains("ROUNDABOUTS_TICK_MS"));
}
