/*!
 * Tests for provider construction and mock behavior
 */

use std::sync::Arc;
use subtrans::app_config::{Config, TranslationProvider};
use subtrans::errors::{AppError, ProviderError};
use subtrans::providers::mock::MockProvider;
use subtrans::providers::{create_provider, Provider};

/// Test that the configured provider is built
#[test]
fn test_create_provider_shouldFollowConfig() {
    let config = Config::default();
    let provider = create_provider(&config).expect("google provider");
    assert_eq!(provider.name(), "Google Translate");

    let config = Config {
        provider: TranslationProvider::LibreTranslate,
        ..Config::default()
    };
    let provider = create_provider(&config).expect("libretranslate provider");
    assert_eq!(provider.name(), "LibreTranslate");
}

/// Test that an invalid configuration is rejected before any client is built
#[test]
fn test_create_provider_withInvalidEndpoint_shouldFail() {
    let mut config = Config::default();
    config.set_endpoint("not a url");

    assert!(matches!(create_provider(&config), Err(AppError::Config(_))));
}

/// Test that the intermittent mock fails on schedule
#[tokio::test]
async fn test_mock_intermittent_shouldFailEveryNthRequest() {
    let provider = MockProvider::intermittent(2);

    assert!(provider.translate("a", "en", "fa").await.is_ok());
    assert!(matches!(
        provider.translate("b", "en", "fa").await,
        Err(ProviderError::ConnectionError(_))
    ));
    assert!(provider.translate("c", "en", "fa").await.is_ok());
    assert_eq!(provider.request_count(), 3);
}

/// Test that a shared provider delegates through Arc
#[tokio::test]
async fn test_arc_provider_shouldDelegate() {
    let provider = Arc::new(MockProvider::echo());
    let shared: Box<dyn Provider> = Box::new(provider.clone());

    let text = shared.translate("same", "en", "fa").await.unwrap();

    assert_eq!(text, "same");
    assert_eq!(shared.name(), "Mock");
    assert_eq!(provider.request_count(), 1);
}

/// Test provider error messages
#[test]
fn test_provider_error_display() {
    let error = ProviderError::ApiError { status_code: 429, message: "slow down".to_string() };
    assert_eq!(error.to_string(), "API responded with error: 429 - slow down");
    assert_eq!(ProviderError::EmptyResponse.to_string(), "Empty translation returned");

    let wrapped = AppError::from(ProviderError::EmptyResponse);
    assert!(matches!(wrapped, AppError::Provider(ProviderError::EmptyResponse)));
    assert_eq!(wrapped.to_string(), "Provider error: Empty translation returned");
}
