//! Tests for configuration validation

use slot_orchestrator::config::{ExternalLoadConfig, SimulationConfig};

#[test]
fn test_default_config_is_valid() {
    let config = SimulationConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.slot_count, 60);
    assert_eq!(config.slot_capacity, 48_000);
    assert_eq!(config.tick_ms, 500);
    assert_eq!(config.external_load, ExternalLoadConfig { enabled: false, percent: 50 });
}

#[test]
fn test_invalid_slot_count() {
    assert!(SimulationConfig::default().with_slot_count(0).validate().is_err());
}

#[test]
fn test_invalid_capacity() {
    assert!(SimulationConfig::default().with_slot_capacity(0).validate().is_err());
}

#[test]
fn test_invalid_external_percent() {
    let config = SimulationConfig::default().with_external_load(true, 101);
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_tick() {
    assert!(SimulationConfig::default().with_tick_ms(0).validate().is_err());
}

#[test]
fn test_config_from_json_partial() {
    let json = r#"{
        "slot_capacity": 1000,
        "group_preserving": true,
        "external_load": { "enabled": true }
    }"#;

    let config = SimulationConfig::from_json_str(json).expect("valid json");
    assert_eq!(config.slot_capacity, 1000);
    assert_eq!(config.slot_count, 60);
    assert!(config.group_preserving);
    assert!(config.external_load.enabled);
    assert_eq!(config.external_load.percent, 50);
}

#[test]
fn test_config_from_json_invalid() {
    assert!(SimulationConfig::from_json_str(r#"{ "slot_count": 0 }"#).is_err());
    assert!(SimulationConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_json_round_trip_keys() {
    let json = serde_json::to_value(SimulationConfig::default()).unwrap();
    assert_eq!(json["slot_capacity"], 48_000);
    assert_eq!(json["external_load"]["percent"], 50);
}
