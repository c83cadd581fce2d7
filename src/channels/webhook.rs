//! Webhook notifier: posts classification summaries to an incoming webhook
//! (Slack-style `{"text": ...}` body).

use async_trait::async_trait;
use tracing::{info, warn};

use crate::channels::notifier::{NotificationOutcome, NotificationPayload, Notifier};
use crate::pipeline::types::Category;

/// Posts one JSON summary per classified message.
pub struct WebhookNotifier {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// `None` disables delivery; every call then returns `Skipped`.
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn notify(
        &self,
        original: &str,
        translated: &str,
        category: &Category,
    ) -> NotificationOutcome {
        let Some(url) = self.webhook_url.as_deref() else {
            warn!("Webhook URL not configured; skipping notification");
            return NotificationOutcome::Skipped;
        };

        let payload = NotificationPayload::new(original, translated, category);

        let resp = match self.client.post(url).json(&payload).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "Webhook request failed");
                return NotificationOutcome::Failed {
                    status: None,
                    reason: e.to_string(),
                };
            }
        };

        let status = resp.status();
        if status.is_success() {
            info!(category = %category, "Notification delivered");
            return NotificationOutcome::Delivered;
        }

        let body = resp.text().await.unwrap_or_default();
        warn!(
            status = status.as_u16(),
            body = %body,
            "Webhook rejected notification"
        );
        NotificationOutcome::Failed {
            status: Some(status.as_u16()),
            reason: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        }
    }
}
