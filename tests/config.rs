//! Configuration system tests
//!
//! Tests for config paths and settings persistence.

use glance::config::GlanceConfig;
use glance::config_paths;
use tempfile::TempDir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_glance() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("glance"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let file = config_paths::config_file().unwrap();
    assert!(file.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_logs_dir_is_inside_config_dir() {
    let dir = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(dir));
}

#[test]
fn test_ensure_dir_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("glance").join("logs");

    config_paths::ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
    // Already there
    config_paths::ensure_dir(&nested).unwrap();
}

#[test]
fn test_ensure_dir_error_names_the_path() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    std::fs::write(&blocker, "").unwrap();

    let err = config_paths::ensure_dir(&blocker.join("logs")).unwrap_err();
    assert!(format!("{:#}", err).contains("not_a_dir"));
}

// ========================================================================
// Persistence Tests
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.yaml");

    let config = GlanceConfig {
        disable_language_suffix: "txt,md".to_string(),
        right_aligned: false,
        diff_three_side_middle: true,
        ..GlanceConfig::default()
    };
    config.save_to(&path).unwrap();

    let loaded = GlanceConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(&path, "right_aligned: false\n").unwrap();

    let loaded = GlanceConfig::load_from(&path).unwrap();
    assert!(!loaded.right_aligned);
    assert!(loaded.diff_two_side);
    assert!(loaded.hide_original_scroll_bar);
    assert!(loaded.disabled_extensions().is_empty());
}

#[test]
fn test_missing_file_is_an_error_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.yaml");

    let err = GlanceConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.yaml"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(&path, "right_aligned: [not, a, bool]\n").unwrap();

    assert!(GlanceConfig::load_from(&path).is_err());
}
