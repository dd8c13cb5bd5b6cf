use lapdash_core::config::{ConfigError, OverlayConfig, OverlayLayout, WindowOffset};
use lapdash_core::metrics::SpeedZonePolicy;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = OverlayConfig::default();
    config.tick_rate_hz = 60.0;
    config.metrics.speed_zones = SpeedZonePolicy::relative();
    config.metrics.fuel_window_laps = 3;
    config.layout.dash_window = WindowOffset { x: 100, y: 640 };
    config.save(&path).unwrap();

    let loaded = OverlayConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempdir().unwrap();
    let config = OverlayConfig::load_or_default(dir.path().join("missing.json")).unwrap();
    assert_eq!(config, OverlayConfig::default());
}

#[test]
fn test_default_layout_matches_saved_window_offsets() {
    let layout = OverlayLayout::default();
    assert_eq!(layout.delta_window, WindowOffset { x: 50, y: 30 });
    assert_eq!(layout.dash_window, WindowOffset { x: 740, y: 830 });
    assert!(layout.borderless);
    assert!(layout.always_on_top);
}

#[test]
fn test_tick_interval() {
    let config = OverlayConfig {
        tick_rate_hz: 100.0,
        ..OverlayConfig::default()
    };
    assert_eq!(config.tick_interval(), Duration::from_millis(10));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ tick_rate_hz: ").unwrap();

    assert!(matches!(OverlayConfig::load(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    for (body, field) in [
        (r#"{"metrics": {"max_rpm": 0}}"#, "metrics.max_rpm"),
        (r#"{"metrics": {"fuel_window_laps": 0}}"#, "metrics.fuel_window_laps"),
        (
            r#"{"metrics": {"speed_zones": {"policy": "fixed", "low_below_mph": 130, "high_above_mph": 120}}}"#,
            "metrics.speed_zones",
        ),
        (
            r#"{"metrics": {"speed_zones": {"policy": "relative", "low_fraction": 0.9, "mid_fraction": 0.4}}}"#,
            "metrics.speed_zones",
        ),
        (r#"{"tick_rate_hz": 0.5}"#, "tick_rate_hz"),
    ] {
        std::fs::write(&path, body).unwrap();
        match OverlayConfig::load(&path) {
            Err(ConfigError::Invalid { field: got, .. }) => assert_eq!(got, field),
            other => panic!("expected {field} to be rejected, got {other:?}"),
        }
    }
}
