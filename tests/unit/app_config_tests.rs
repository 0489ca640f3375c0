/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subshift::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.encoding, "UTF-8");
    assert_eq!(config.output.suffix, "shifted");
    assert!(!config.output.in_place);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.encoding = "not-an-encoding".to_string();
    assert!(config.validate().is_err());
    config.encoding = "windows-1252".to_string();
    assert!(config.validate().is_ok());

    config.output.suffix = "".to_string();
    assert!(config.validate().is_err());

    // No suffix is needed when overwriting the input
    config.output.in_place = true;
    assert!(config.validate().is_ok());

    config.output.suffix = "../escape".to_string();
    assert!(config.validate().is_err());
}

/// Test that partial JSON falls back to defaults
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{ "encoding": "ISO-8859-1", "log_level": "debug" }"#)?;

    assert_eq!(config.encoding, "ISO-8859-1");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.output.suffix, "shifted");

    Ok(())
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let mut changed = created.clone();
    changed.output.suffix = "sync".to_string();
    changed.save(&path)?;

    assert_eq!(Config::load_or_create(&path)?, changed);
    Ok(())
}

#[test]
fn test_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}
