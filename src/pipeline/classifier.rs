//! Classifier: maps English text onto the support-intent taxonomy.
//!
//! The model is asked for one label from the closed set, but its answer is
//! free text. We normalize it (trim + lowercase) and pass it on; labels outside
//! the taxonomy are not rejected here.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LlmError;
use crate::llm::provider::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::palette;
use crate::pipeline::types::Category;

/// Max tokens for the classification call.
const CLASSIFY_MAX_TOKENS: u32 = 500;

/// Temperature for classification (deterministic-ish).
const CLASSIFY_TEMPERATURE: f32 = 0.2;

pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
}

impl Classifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Classify English `message` into a category label.
    pub async fn classify(&self, message: &str) -> Result<Category, LlmError> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(build_classifier_system_prompt()),
            ChatMessage::user(message),
        ])
        .with_temperature(CLASSIFY_TEMPERATURE)
        .with_max_tokens(CLASSIFY_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        let category = Category::from_response(&response.content);

        if category.is_known() {
            debug!(category = %category, "Classified message");
        } else {
            warn!(
                category = %category,
                "Classifier returned a label outside the taxonomy"
            );
        }

        Ok(category)
    }
}

/// Build the classifier system prompt from the palette table.
fn build_classifier_system_prompt() -> String {
    let mut prompt = String::from(
        "You are an assistant that classifies customer queries into one of the following categories:\n",
    );
    for label in palette::known_categories() {
        prompt.push_str("- ");
        prompt.push_str(label);
        prompt.push('\n');
    }
    prompt.push_str("\nReturn only the category name in the way they are typed.");
    prompt
}
