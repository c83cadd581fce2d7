//! Intent pipeline: translates, classifies and notifies for one message.
//!
//! Flow (strictly sequential, single pass):
//! 1. Translator → English text (abort on failure)
//! 2. Classifier → category label (abort on failure)
//! 3. Palette lookup → display color (unknown labels get the default)
//! 4. Notifier → best-effort webhook delivery (never aborts)

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::channels::{NotificationOutcome, Notifier, WebhookNotifier};
use crate::config::RelayConfig;
use crate::error::{ConfigError, PipelineError};
use crate::llm::{LlmProvider, create_provider};
use crate::pipeline::classifier::Classifier;
use crate::pipeline::translator::Translator;
use crate::pipeline::types::{InboundMessage, PipelineOutcome, PipelineStage};

/// Orchestrates Translator → Classifier → Notifier.
///
/// Holds no per-request state; every call to [`process`](Self::process)
/// performs all remote calls again.
pub struct IntentPipeline {
    translator: Translator,
    classifier: Classifier,
    notifier: Arc<dyn Notifier>,
}

impl IntentPipeline {
    /// Create a pipeline from its collaborators.
    pub fn new(llm: Arc<dyn LlmProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            translator: Translator::new(Arc::clone(&llm)),
            classifier: Classifier::new(llm),
            notifier,
        }
    }

    /// Create a pipeline wired to the configured endpoint and webhook.
    pub fn from_config(config: &RelayConfig) -> Result<Self, ConfigError> {
        let llm = create_provider(&config.llm)?;
        let notifier: Arc<dyn Notifier> =
            Arc::new(WebhookNotifier::new(config.webhook_url.clone()));
        Ok(Self::new(llm, notifier))
    }

    /// Run one message through the pipeline.
    ///
    /// Translation and classification failures abort with no partial
    /// output. Once a category exists the outcome is always returned,
    /// whatever happened to the notification.
    pub async fn process(
        &self,
        message: InboundMessage,
    ) -> Result<PipelineOutcome, PipelineError> {
        if message.content.trim().is_empty() {
            return Err(PipelineError::EmptyMessage);
        }

        info!(
            id = %message.id,
            chars = message.content.chars().count(),
            stage = PipelineStage::Received.label(),
            "Processing message"
        );

        // Step 1: translate
        let translation = self
            .translator
            .translate(&message.content)
            .await
            .map_err(|e| {
                error!(id = %message.id, error = %e, "Translation failed");
                PipelineError::Translation(e)
            })?;
        info!(
            id = %message.id,
            stage = PipelineStage::Translated.label(),
            changed = translation.differs_from(&message.content),
            "Message translated"
        );

        // Step 2: classify
        let category = self
            .classifier
            .classify(translation.as_str())
            .await
            .map_err(|e| {
                error!(id = %message.id, error = %e, "Classification failed");
                PipelineError::Classification(e)
            })?;

        // Step 3: display mapping
        let color = category.color();
        info!(
            id = %message.id,
            stage = PipelineStage::Classified.label(),
            category = %category,
            known = category.is_known(),
            color,
            "Message classified"
        );

        // Step 4: notify (best-effort)
        let notification = self
            .notifier
            .notify(&message.content, translation.as_str(), &category)
            .await;
        if let NotificationOutcome::Failed { status, reason } = &notification {
            warn!(
                id = %message.id,
                notifier = self.notifier.name(),
                status = ?status,
                reason = %reason,
                "Notification failed; keeping classification"
            );
        }

        let outcome = PipelineOutcome {
            message,
            translation,
            category,
            color,
            notification,
            completed_at: Utc::now(),
        };

        info!(
            id = %outcome.message.id,
            stage = outcome.notify_stage().label(),
            "Notification step finished"
        );
        info!(
            id = %outcome.message.id,
            stage = PipelineStage::Done.label(),
            "Pipeline complete"
        );

        Ok(outcome)
    }
}
