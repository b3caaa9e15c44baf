//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, reset behavior and config
//! resolution.

use briar::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use briar::types::errors::SettingsError;
use briar::types::settings::{BrowserSettings, DEFAULT_SEARCH_URL, DEFAULT_WINDOW_SIZE};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(
        settings,
        BrowserSettings::default(),
        "Loading without a config file must return default settings"
    );
}

#[test]
fn test_defaults_resolve_to_documented_config() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    let config = engine.config();

    assert_eq!(config.home_page, "https://duckduckgo.com");
    assert_eq!(config.search_url, DEFAULT_SEARCH_URL);
    assert_eq!((config.width, config.height), DEFAULT_WINDOW_SIZE);
    assert!(config.dark_mode);
    assert!(!config.smooth_scroll);
    assert!(config.animations);
    assert_eq!(config.sidebar_width, 0);
    assert!(config.cookies && config.history && config.caching);
    assert!(config.history_path().ends_with("history"));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{
            "options": { "home_page": "https://example.com", "cache_dir": "/tmp/briar-test-cache" },
            "appearance": { "width": 800, "height": 600 },
            "privacy": { "history": false },
            "keys": { "Ctrl+Shift+X": "reload" }
        }"#,
    )
    .unwrap();
    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));

    let settings = engine.load().unwrap();
    assert_eq!(settings.options.home_page, "https://example.com");
    assert_eq!(settings.keys.get("Ctrl+Shift+X").map(String::as_str), Some("reload"));

    let config = engine.config();
    assert_eq!((config.width, config.height), (800, 600));
    assert!(!config.history);
    assert!(config.cookies);
    assert_eq!(config.search_url, DEFAULT_SEARCH_URL);
    assert_eq!(
        config.history_path(),
        std::path::PathBuf::from("/tmp/briar-test-cache/history")
    );
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));

    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_set_value_persists_immediately() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine
        .set_value("appearance.sidebar_width", serde_json::json!(180))
        .unwrap();
    assert_eq!(engine.get_settings().appearance.sidebar_width, 180);

    let mut reloaded = engine_in_temp(&dir);
    let settings = reloaded.load().unwrap();
    assert_eq!(settings.appearance.sidebar_width, 180);
}

#[test]
fn test_set_value_adds_user_keybinding() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    engine
        .set_value("keys.Alt+r", serde_json::json!("reloadforce"))
        .unwrap();
    assert_eq!(
        engine.get_settings().keys.get("Alt+r").map(String::as_str),
        Some("reloadforce")
    );
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine.set_value("privacy.cookies", serde_json::json!("yes"));
    assert!(matches!(err, Err(SettingsError::InvalidValue(_))));
    assert!(engine.get_settings().privacy.cookies);
}

#[test]
fn test_set_value_rejects_unknown_section() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    assert!(matches!(
        engine.set_value("network.proxy", serde_json::json!("socks5://x")),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("", serde_json::json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine
        .set_value("options.home_page", serde_json::json!("https://example.org"))
        .unwrap();

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &BrowserSettings::default());

    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap(), BrowserSettings::default());
}
