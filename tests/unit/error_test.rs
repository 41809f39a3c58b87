//! Tests for error types

use slot_orchestrator::core::SchedulerError;

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("slot_count must be greater than 0".to_string());
    assert_eq!(format!("{err}"), "invalid config: slot_count must be greater than 0");
}

#[test]
fn test_export_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let err: SchedulerError = io.into();
    assert_eq!(format!("{err}"), "export failed: pipe closed");
}

#[test]
fn test_serialization_error_from_json() {
    let json_err = serde_json::from_str::<u32>("x").unwrap_err();
    let err: SchedulerError = json_err.into();
    assert!(format!("{err}").starts_with("serialization error:"));
}
