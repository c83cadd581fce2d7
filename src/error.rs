//! Error types for Intent Relay.

use std::time::Duration;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },
}

/// Pipeline-related errors.
///
/// Every variant is fatal for the current message only. Notification
/// problems never show up here; they are reported through
/// [`crate::channels::NotificationOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Translation failed: {0}")]
    Translation(#[source] LlmError),

    #[error("Classification failed: {0}")]
    Classification(#[source] LlmError),
}
