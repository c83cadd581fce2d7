//! Intent Relay: multilingual support-intent classifier.
//!
//! Translates a customer message to English, classifies it into a support
//! category, and forwards a summary to a team webhook.

pub mod channels;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
