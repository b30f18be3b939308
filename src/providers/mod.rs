/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for:
 * - Google: the public `gtx` translate endpoint
 * - LibreTranslate: self-hosted or public LibreTranslate servers
 * - Mock: deterministic providers for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{Config, TranslationProvider};
use crate::errors::{AppError, ProviderError};

/// Common trait for all translation providers
///
/// The runner only ever needs a single line translated, so the interface is
/// a plain text-in, text-out call. Implementations must not retry; the caller
/// decides what a failure means.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Human-readable provider name used in log output
    fn name(&self) -> &str;

    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        (**self).translate(text, source_language, target_language).await
    }
}

/// Build the provider selected by the configuration, validating it first
pub fn create_provider(config: &Config) -> Result<Box<dyn Provider>, AppError> {
    config.validate()?;

    let timeout = Duration::from_secs(config.get_timeout_secs());
    let endpoint = config.get_endpoint();

    let provider: Box<dyn Provider> = match config.provider {
        TranslationProvider::Google => Box::new(google::Google::new(endpoint, timeout)?),
        TranslationProvider::LibreTranslate => Box::new(
            libretranslate::LibreTranslate::new(endpoint, config.get_api_key(), timeout)?,
        ),
    };

    Ok(provider)
}

/// Shared HTTP client construction for the concrete providers
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("subtrans/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))
}

/// Map a non-success HTTP status to the matching provider error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String) -> ProviderError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        ProviderError::RateLimitExceeded(body)
    } else {
        ProviderError::ApiError {
            status_code: status.as_u16(),
            message: body,
        }
    }
}

pub mod google;
pub mod libretranslate;
pub mod mock;
