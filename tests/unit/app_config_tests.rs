/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subtrans::app_config::{Config, ConfigOverrides, LogLevel, TranslationProvider};
use subtrans::errors::AppError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.provider, TranslationProvider::Google);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.show_progress);
    assert_eq!(config.get_endpoint(), "https://translate.googleapis.com");
    assert_eq!(config.get_timeout_secs(), 30);
    assert!(config.get_provider_config(&TranslationProvider::LibreTranslate).is_some());
    assert!(config.validate().is_ok());
}

/// Test that a missing optional file falls back to defaults
#[test]
fn test_load_withMissingOptionalFile_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load(temp_dir.path().join("subtrans.json"), false)?;
    assert_eq!(config.provider, TranslationProvider::Google);
    Ok(())
}

/// Test that a missing required file is an error
#[test]
fn test_load_withMissingRequiredFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = Config::load(temp_dir.path().join("custom.json"), true);
    assert!(matches!(result, Err(AppError::Config(_))));
    Ok(())
}

/// Test that a partial file is completed with defaults
#[test]
fn test_load_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "subtrans.json",
        r#"{
            "provider": "libretranslate",
            "available_providers": [
                { "type": "libretranslate", "endpoint": "http://localhost:5000", "api_key": "k" }
            ],
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load(&path, true)?;

    assert_eq!(config.provider, TranslationProvider::LibreTranslate);
    assert_eq!(config.get_endpoint(), "http://localhost:5000");
    assert_eq!(config.get_api_key(), "k");
    assert_eq!(config.get_timeout_secs(), 30);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.show_progress);
    Ok(())
}

/// Test that malformed JSON is reported as a configuration error
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", "{ provider: ")?;
    assert!(matches!(Config::load(&path, true), Err(AppError::Config(_))));
    Ok(())
}

/// Test that a missing default file is fine but a missing explicit file is not
#[test]
fn test_resolve_withMissingFiles_shouldOnlyRequireExplicitPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let default_path = temp_dir.path().join("subtrans.json");
    let overrides = ConfigOverrides::default();

    let config = Config::resolve(None, &default_path, &overrides)?;
    assert_eq!(config.provider, TranslationProvider::Google);

    let explicit = temp_dir.path().join("custom.json");
    let result = Config::resolve(Some(explicit.as_path()), &default_path, &overrides);
    assert!(matches!(result, Err(AppError::Config(_))));
    Ok(())
}

/// Test that an explicit file is used instead of the default one
#[test]
fn test_resolve_withExplicitPath_shouldIgnoreDefaultFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let default_path = common::create_test_file(temp_dir.path(), "subtrans.json", r#"{ "log_level": "error" }"#)?;
    let explicit = common::create_test_file(temp_dir.path(), "custom.json", r#"{ "log_level": "trace" }"#)?;

    let config = Config::resolve(Some(explicit.as_path()), &default_path, &ConfigOverrides::default())?;

    assert_eq!(config.log_level, LogLevel::Trace);
    Ok(())
}

/// Test that command-line settings win over the file
#[test]
fn test_resolve_withOverrides_shouldTakePrecedenceOverFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "subtrans.json",
        r#"{
            "provider": "google",
            "available_providers": [
                { "type": "google", "endpoint": "https://translate.googleapis.com" },
                { "type": "libretranslate", "endpoint": "http://file-host:5000" }
            ],
            "log_level": "warn",
            "show_progress": true
        }"#,
    )?;
    let overrides = ConfigOverrides {
        provider: Some(TranslationProvider::LibreTranslate),
        endpoint: Some("http://localhost:5000".to_string()),
        log_level: Some(LogLevel::Debug),
        show_progress: Some(false),
    };

    let config = Config::resolve(None, &path, &overrides)?;

    assert_eq!(config.provider, TranslationProvider::LibreTranslate);
    assert_eq!(config.get_endpoint(), "http://localhost:5000");
    assert_eq!(
        config.get_provider_config(&TranslationProvider::Google).map(|p| p.endpoint.as_str()),
        Some("https://translate.googleapis.com")
    );
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(!config.show_progress);
    Ok(())
}

/// Test that file values survive when nothing is overridden
#[test]
fn test_resolve_withoutOverrides_shouldKeepFileValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "subtrans.json",
        r#"{ "provider": "libretranslate", "log_level": "warn", "show_progress": false }"#,
    )?;

    let config = Config::resolve(None, &path, &ConfigOverrides::default())?;

    assert_eq!(config.provider, TranslationProvider::LibreTranslate);
    assert_eq!(config.get_endpoint(), "https://libretranslate.com");
    assert_eq!(config.log_level, LogLevel::Warn);
    assert!(!config.show_progress);
    Ok(())
}

/// Test that an override producing an invalid endpoint is rejected
#[test]
fn test_resolve_withInvalidEndpointOverride_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let overrides = ConfigOverrides {
        endpoint: Some("localhost:5000/translate".to_string()),
        ..ConfigOverrides::default()
    };

    let result = Config::resolve(None, &temp_dir.path().join("subtrans.json"), &overrides);

    assert!(matches!(result, Err(AppError::Config(_))));
    Ok(())
}

/// Test configuration validation
#[test]
fn test_validate_withBadEndpointOrTimeout_shouldFail() {
    let mut config = Config::default();
    config.set_endpoint("not a url");
    assert!(config.validate().is_err());

    config.set_endpoint("ftp://example.com");
    assert!(config.validate().is_err());

    config.set_endpoint("http://localhost:8080");
    assert!(config.validate().is_ok());

    config.available_providers[0].timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test that setting an endpoint adds a missing provider entry
#[test]
fn test_set_endpoint_withoutProviderEntry_shouldAddOne() {
    let mut config = Config {
        provider: TranslationProvider::LibreTranslate,
        available_providers: Vec::new(),
        ..Config::default()
    };

    config.set_endpoint("http://translate.local");

    assert_eq!(config.available_providers.len(), 1);
    assert_eq!(config.get_endpoint(), "http://translate.local");
}

/// Test provider name parsing
#[test]
fn test_provider_from_str_shouldParseKnownNames() {
    assert_eq!("Google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("libretranslate".parse::<TranslationProvider>().unwrap(), TranslationProvider::LibreTranslate);
    assert!("deepl".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::LibreTranslate.to_string(), "libretranslate");
}
