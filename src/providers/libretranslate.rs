use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{build_client, status_error, Provider};

/// Client for a LibreTranslate server
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Server base URL
    endpoint: String,
    /// API key, empty when the server does not require one
    api_key: String,
}

/// LibreTranslate `/translate` request body
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    /// Text to translate
    pub q: &'a str,
    /// Source language code
    pub source: &'a str,
    /// Target language code
    pub target: &'a str,
    /// Input format, always plain text here
    pub format: &'a str,
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

/// LibreTranslate `/translate` response body
#[derive(Debug, Deserialize)]
pub struct LibreTranslateResponse {
    /// The translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl LibreTranslate {
    /// Create a new LibreTranslate client
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    fn api_url(&self) -> String {
        format!("{}/translate", self.endpoint.trim_end_matches('/'))
    }

    /// Build the request body for one line
    pub fn build_request<'a>(
        &'a self,
        text: &'a str,
        source_language: &'a str,
        target_language: &'a str,
    ) -> LibreTranslateRequest<'a> {
        LibreTranslateRequest {
            q: text,
            source: source_language,
            target: target_language,
            format: "text",
            api_key: (!self.api_key.is_empty()).then_some(self.api_key.as_str()),
        }
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    fn name(&self) -> &str {
        "LibreTranslate"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(text, source_language, target_language);
        let response = self.client.post(self.api_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            debug!("LibreTranslate error ({}): {}", status, body);
            return Err(status_error(status, body));
        }

        let body = response.text().await?;
        let parsed: LibreTranslateResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if parsed.translated_text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(parsed.translated_text)
    }
}
