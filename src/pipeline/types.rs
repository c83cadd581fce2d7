//! Shared types for the translate → classify → notify pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::channels::NotificationOutcome;
use crate::pipeline::palette;

// ── Inbound message ─────────────────────────────────────────────────

/// A raw customer message, in any language.
///
/// Immutable once received and discarded once the pipeline returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Generated per request, used only to correlate log lines.
    pub id: Uuid,
    /// Message body exactly as the user typed it.
    pub content: String,
    /// When the message was received.
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            received_at: Utc::now(),
        }
    }
}

// ── Translation ─────────────────────────────────────────────────────

/// English rendering of a message. Equal to the input when already English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation(String);

impl Translation {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the translation is worth showing next to `original`.
    ///
    /// Case-insensitive; display only. Notification uses an exact comparison.
    pub fn differs_from(&self, original: &str) -> bool {
        self.0.to_lowercase() != original.to_lowercase()
    }
}

// ── Category ────────────────────────────────────────────────────────

/// Classifier label, normalized to trimmed lowercase.
///
/// Not validated against the taxonomy: an unrecognized label is a valid
/// category that simply gets the default display color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category(String);

impl Category {
    /// Normalize raw model output into a category label.
    pub fn from_response(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this label is one of the known taxonomy entries.
    pub fn is_known(&self) -> bool {
        palette::known_categories().any(|known| known == self.0)
    }

    /// Display color, falling back to [`palette::DEFAULT_COLOR`].
    pub fn color(&self) -> &'static str {
        palette::color_for(&self.0)
    }

    /// Title-cased label for display ("order tracking" → "Order Tracking").
    pub fn title(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut at_word_start = true;
        for c in self.0.chars() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = !c.is_alphabetic();
        }
        out
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Stages ──────────────────────────────────────────────────────────

/// Progress of one message through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Translated,
    Classified,
    Notified,
    NotifySkipped,
    Done,
}

impl PipelineStage {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Translated => "translated",
            Self::Classified => "classified",
            Self::Notified => "notified",
            Self::NotifySkipped => "notify_skipped",
            Self::Done => "done",
        }
    }
}

// ── Outcome ─────────────────────────────────────────────────────────

/// Everything the caller gets back for one message.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The original inbound message.
    pub message: InboundMessage,
    /// English rendering of the message.
    pub translation: Translation,
    /// Classifier label (possibly outside the taxonomy).
    pub category: Category,
    /// Display color for `category`.
    pub color: &'static str,
    /// What happened to the webhook notification.
    pub notification: NotificationOutcome,
    /// When processing completed.
    pub completed_at: DateTime<Utc>,
}

impl PipelineOutcome {
    /// The notification stage this outcome passed through.
    pub fn notify_stage(&self) -> PipelineStage {
        match self.notification {
            NotificationOutcome::Skipped => PipelineStage::NotifySkipped,
            NotificationOutcome::Delivered | NotificationOutcome::Failed { .. } => {
                PipelineStage::Notified
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_normalizes_model_output() {
        let category = Category::from_response("  Order Tracking\n");
        assert_eq!(category.as_str(), "order tracking");
        assert!(category.is_known());
        assert_eq!(category.color(), "#90EE90");
    }

    #[test]
    fn unknown_category_is_kept_verbatim() {
        let category = Category::from_response("shipping complaint");
        assert_eq!(category.as_str(), "shipping complaint");
        assert!(!category.is_known());
        assert_eq!(category.color(), palette::DEFAULT_COLOR);
    }

    #[test]
    fn category_title_case() {
        assert_eq!(
            Category::from_response("order tracking").title(),
            "Order Tracking"
        );
        assert_eq!(
            Category::from_response("general questions").title(),
            "General Questions"
        );
        assert_eq!(Category::from_response("e-mail issue").title(), "E-Mail Issue");
        assert_eq!(Category::from_response("").title(), "");
    }

    #[test]
    fn translation_difference_is_case_insensitive() {
        let same = Translation::new("where is my order?");
        assert!(!same.differs_from("Where is my order?"));

        let translated = Translation::new("Where is my order?");
        assert!(translated.differs_from("Où est ma commande ?"));
    }

    #[test]
    fn inbound_message_gets_unique_ids() {
        let a = InboundMessage::new("hello");
        let b = InboundMessage::new("hello");
        assert_ne!(a.id, b.id);
        assert_eq!(a.content, "hello");
    }

    #[test]
    fn stage_labels() {
        assert_eq!(PipelineStage::Received.label(), "received");
        assert_eq!(PipelineStage::NotifySkipped.label(), "notify_skipped");
        assert_eq!(PipelineStage::Done.label(), "done");
    }

    fn outcome_with(notification: NotificationOutcome) -> PipelineOutcome {
        PipelineOutcome {
            message: InboundMessage::new("hi"),
            translation: Translation::new("hi"),
            category: Category::from_response("general questions"),
            color: "#D3D3D3",
            notification,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn notify_stage_follows_outcome() {
        assert_eq!(
            outcome_with(NotificationOutcome::Skipped).notify_stage(),
            PipelineStage::NotifySkipped
        );
        assert_eq!(
            outcome_with(NotificationOutcome::Delivered).notify_stage(),
            PipelineStage::Notified
        );
        assert_eq!(
            outcome_with(NotificationOutcome::Failed {
                status: Some(500),
                reason: "boom".into()
            })
            .notify_stage(),
            PipelineStage::Notified
        );
    }
}
