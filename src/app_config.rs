use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::AppError;

/// Application configuration module
/// This module handles loading, validating and overriding configuration
/// settings. Every field has a default so a partial file is enough.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation service to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Per-service settings
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Whether to draw the progress bar
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google gtx endpoint
    #[default]
    Google,
    // @provider: LibreTranslate server
    LibreTranslate,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::LibreTranslate => "LibreTranslate",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::LibreTranslate => "libretranslate".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "libretranslate" => Ok(Self::LibreTranslate),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: API key, only used by LibreTranslate instances that require one
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                endpoint: default_google_endpoint(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::LibreTranslate => Self {
                provider_type: "libretranslate".to_string(),
                endpoint: default_libretranslate_endpoint(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Settings from the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub provider: Option<TranslationProvider>,
    pub endpoint: Option<String>,
    pub log_level: Option<LogLevel>,
    pub show_progress: Option<bool>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_libretranslate_endpoint() -> String {
    "https://libretranslate.com".to_string()
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::Google),
        ProviderConfig::new(TranslationProvider::LibreTranslate),
    ]
}

impl Config {
    /// Load the configuration from a JSON file.
    ///
    /// A missing file yields the default configuration unless `required` is
    /// set, in which case it is an error.
    pub fn load<P: AsRef<Path>>(path: P, required: bool) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            if required {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Load the file given explicitly, or the optional default file, then
    /// apply `overrides` and validate the result.
    ///
    /// An explicit path must exist; the default path may be missing.
    pub fn resolve(
        explicit_path: Option<&Path>,
        default_path: &Path,
        overrides: &ConfigOverrides,
    ) -> Result<Self, AppError> {
        let mut config = match explicit_path {
            Some(path) => Self::load(path, true)?,
            None => Self::load(default_path, false)?,
        };
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line settings on top of the loaded ones
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        // Provider first so the endpoint lands on the selected provider
        if let Some(provider) = overrides.provider {
            self.provider = provider;
        }
        if let Some(endpoint) = &overrides.endpoint {
            self.set_endpoint(endpoint.clone());
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        if let Some(show_progress) = overrides.show_progress {
            self.show_progress = show_progress;
        }
    }

    /// Validate the active provider settings
    pub fn validate(&self) -> Result<(), AppError> {
        let endpoint = self.get_endpoint();
        let url = Url::parse(&endpoint)
            .map_err(|e| AppError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "Endpoint must use http or https: {}",
                endpoint
            )));
        }

        if self.get_timeout_secs() == 0 {
            return Err(AppError::Config(format!(
                "Timeout for {} must be greater than zero",
                self.provider.display_name()
            )));
        }

        Ok(())
    }

    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::LibreTranslate => default_libretranslate_endpoint(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .unwrap_or_else(default_timeout_secs)
    }

    /// Replace the endpoint of the active provider, adding an entry if needed
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        let provider_str = self.provider.to_lowercase_string();
        let endpoint = endpoint.into();
        match self.available_providers.iter_mut().find(|p| p.provider_type == provider_str) {
            Some(provider_config) => provider_config.endpoint = endpoint,
            None => {
                let mut provider_config = ProviderConfig::new(self.provider);
                provider_config.endpoint = endpoint;
                self.available_providers.push(provider_config);
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: TranslationProvider::default(),
            available_providers: default_available_providers(),
            log_level: LogLevel::default(),
            show_progress: true,
        }
    }
}
