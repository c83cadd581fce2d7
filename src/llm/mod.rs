//! LLM integration for Intent Relay.
//!
//! A single OpenAI-compatible chat-completions backend sits behind the
//! `LlmProvider` trait. The translator and classifier only see the trait.

mod openai;
pub mod provider;

pub use openai::OpenAiCompatProvider;
pub use provider::*;

use std::sync::Arc;

use crate::config::{ENDPOINT_VAR, validate_http_url};
use crate::error::ConfigError;

/// Default inference endpoint.
pub const DEFAULT_BASE_URL: &str = "https://models.github.ai/inference";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` when no key was configured; calls will fail with `AuthFailed`.
    pub api_key: Option<secrecy::SecretString>,
    pub base_url: String,
    pub model: String,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, ConfigError> {
    validate_http_url(ENDPOINT_VAR, &config.base_url)?;

    tracing::info!(
        "Using OpenAI-compatible endpoint {} (model: {})",
        config.base_url,
        config.model
    );
    Ok(Arc::new(OpenAiCompatProvider::new(
        config.api_key.clone(),
        &config.base_url,
        &config.model,
    )))
}
