//! Translator: renders a message of any language in English.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LlmError;
use crate::llm::provider::{ChatMessage, CompletionRequest, FinishReason, LlmProvider};
use crate::pipeline::types::Translation;

/// Max tokens for the translation call.
const TRANSLATE_MAX_TOKENS: u32 = 500;

/// Low temperature keeps the output a translation and nothing more.
const TRANSLATE_TEMPERATURE: f32 = 0.2;

pub struct Translator {
    llm: Arc<dyn LlmProvider>,
}

impl Translator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Translate `message` to English. English input comes back unchanged.
    ///
    /// No retry and no fallback: any provider error is returned as is.
    pub async fn translate(&self, message: &str) -> Result<Translation, LlmError> {
        let request = CompletionRequest::new(vec![ChatMessage::user(build_translation_prompt(
            message,
        ))])
        .with_temperature(TRANSLATE_TEMPERATURE)
        .with_max_tokens(TRANSLATE_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Translation complete"
        );
        if response.finish_reason == FinishReason::Length {
            warn!(
                max_tokens = TRANSLATE_MAX_TOKENS,
                "Translation hit the token limit; output may be truncated"
            );
        }

        Ok(Translation::new(response.content.trim()))
    }
}

/// Build the single user-role translation prompt.
fn build_translation_prompt(message: &str) -> String {
    format!(
        "Detect the language of the message and translate it to English. \
         Return only the translated text. If it's already in English, return it unchanged.\n\n\
         Message: {message}"
    )
}
