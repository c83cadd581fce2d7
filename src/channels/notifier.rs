//! Notifier abstraction and the team-channel summary format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::pipeline::types::Category;

/// Placeholder for the translated field when no translation happened.
pub const NO_TRANSLATION: &str = "N/A";

/// Result of a single best-effort delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The endpoint answered with a 2xx status.
    Delivered,
    /// No endpoint configured; nothing was sent.
    Skipped,
    /// The attempt was made and did not succeed. Not retried.
    Failed {
        /// HTTP status, when a response arrived at all.
        status: Option<u16>,
        reason: String,
    },
}

/// JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub text: String,
}

impl NotificationPayload {
    /// Compose the summary block for one classified message.
    ///
    /// The translated field is `N/A` exactly when `translated == original`.
    pub fn new(original: &str, translated: &str, category: &Category) -> Self {
        let translated_field = if original != translated {
            translated
        } else {
            NO_TRANSLATION
        };
        let text = format!(
            "*New Customer Query Classified!*\n\
             > *Category:* `{category}`\n\
             > *Original Message:* {original}\n\
             > *Translated:* {translated_field}"
        );
        Self { text }
    }
}

/// Outbound sink for classification summaries.
///
/// Implementations never return errors: delivery is best-effort and every
/// problem is folded into the returned [`NotificationOutcome`].
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sink name (e.g. "webhook").
    fn name(&self) -> &str;

    /// Deliver one summary. At most one attempt.
    async fn notify(
        &self,
        original: &str,
        translated: &str,
        category: &Category,
    ) -> NotificationOutcome;
}
