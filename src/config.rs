//! Configuration types.
//!
//! Everything is read once at startup and handed to constructors; nothing in
//! the pipeline reads the environment itself.

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmConfig};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";
pub const ENDPOINT_VAR: &str = "INTENT_RELAY_ENDPOINT";
pub const MODEL_VAR: &str = "INTENT_RELAY_MODEL";

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Text-generation service settings.
    pub llm: LlmConfig,
    /// Incoming-webhook URL. `None` disables notification.
    pub webhook_url: Option<String>,
}

impl RelayConfig {
    /// Load using an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).map(SecretString::from);
        let base_url = get(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let webhook_url = get(WEBHOOK_URL_VAR);
        if let Some(ref url) = webhook_url {
            validate_http_url(WEBHOOK_URL_VAR, url)?;
        }
        validate_http_url(ENDPOINT_VAR, &base_url)?;

        Ok(Self {
            llm: LlmConfig {
                api_key,
                base_url,
                model,
            },
            webhook_url,
        })
    }

    /// True when no API key was configured. Reported as a startup warning.
    pub fn api_key_missing(&self) -> bool {
        self.llm.api_key.is_none()
    }
}

/// Accept only absolute `http`/`https` URLs with a host.
pub fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let url = reqwest::Url::parse(value)
        .map_err(|e| invalid(format!("'{value}' is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some_and(|h| !h.is_empty()) => Ok(()),
        "http" | "https" => Err(invalid(format!("'{value}' has no host"))),
        scheme => Err(invalid(format!("expected an http(s) URL, got scheme '{scheme}'"))),
    }
}
