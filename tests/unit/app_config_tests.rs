/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;

use kyra::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8501);
    assert_eq!(config.server.bind_address(), "127.0.0.1:8501");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.server.port = 0;
    assert!(config.validate().is_err());
    config.server.port = 8080;

    config.server.host = " ".to_string();
    assert!(config.validate().is_err());
    config.server.host = "0.0.0.0".to_string();

    config.database.path = PathBuf::new();
    assert!(config.validate().is_err());
}

/// A missing file is created with defaults and reloads identically
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("kyra.json");

    let created = Config::load_or_create(&path).unwrap();
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path).unwrap();
    assert_eq!(created, reloaded);
}

/// Saved values survive a round trip through the file
#[test]
fn test_loadOrCreate_withCustomFile_shouldReadValues() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("custom.json");

    let mut config = Config::default();
    config.database.path = dir.path().join("data.db");
    config.server.port = 9100;
    config.log_level = LogLevel::Debug;
    config.save(&path).unwrap();

    let loaded = Config::load_or_create(&path).unwrap();
    assert_eq!(loaded.database.path, dir.path().join("data.db"));
    assert_eq!(loaded.server.port, 9100);
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

/// Invalid JSON is reported, not replaced
#[test]
fn test_loadOrCreate_withBrokenFile_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_or_create(&path).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}
