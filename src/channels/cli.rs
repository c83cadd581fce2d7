//! CLI channel: stdin REPL and terminal rendering of pipeline outcomes.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::channels::NotificationOutcome;
use crate::error::PipelineError;
use crate::pipeline::palette::hex_to_rgb;
use crate::pipeline::{InboundMessage, IntentPipeline, PipelineOutcome};

/// Line that ends the REPL.
const QUIT_COMMAND: &str = "/quit";

/// Counters for one REPL session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub processed: usize,
    pub failed: usize,
}

/// Terminal front end: reads messages, prints predictions.
pub struct CliChannel {
    color: bool,
}

impl CliChannel {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Run one message and print the result. Returns the pipeline error, if any,
    /// after printing it.
    pub async fn run_once(
        &self,
        pipeline: &IntentPipeline,
        text: &str,
    ) -> Result<PipelineOutcome, PipelineError> {
        match pipeline.process(InboundMessage::new(text)).await {
            Ok(outcome) => {
                println!("\n{}\n", render_outcome(&outcome, self.color));
                Ok(outcome)
            }
            Err(e) => {
                eprintln!("{}", render_error(&e));
                Err(e)
            }
        }
    }

    /// Interactive loop over stdin until EOF or `/quit`.
    pub async fn run(&self, pipeline: &IntentPipeline) -> std::io::Result<SessionStats> {
        let reader = BufReader::new(tokio::io::stdin());
        self.run_lines(pipeline, reader).await
    }

    /// Process one message per line from `reader`. Blank lines are skipped.
    pub async fn run_lines<R>(
        &self,
        pipeline: &IntentPipeline,
        reader: R,
    ) -> std::io::Result<SessionStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut stats = SessionStats::default();

        eprint!("> ");
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                eprint!("> ");
                continue;
            }
            if line == QUIT_COMMAND {
                break;
            }

            match self.run_once(pipeline, line).await {
                Ok(_) => stats.processed += 1,
                Err(_) => stats.failed += 1,
            }
            eprint!("> ");
        }

        tracing::debug!(
            processed = stats.processed,
            failed = stats.failed,
            "CLI session ended"
        );
        Ok(stats)
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// Render an outcome for the operator.
///
/// The translation line only appears when it differs (case-insensitively)
/// from what the user typed.
pub fn render_outcome(outcome: &PipelineOutcome, color: bool) -> String {
    let mut out = String::new();

    if outcome.translation.differs_from(&outcome.message.content) {
        out.push_str(&format!(
            "Translated Message: {}\n",
            outcome.translation.as_str()
        ));
    }

    let banner = format!(" Prediction: {} ", outcome.category.title());
    match hex_to_rgb(outcome.color).filter(|_| color) {
        Some((r, g, b)) => {
            out.push_str(&format!("\x1b[1;30;48;2;{r};{g};{b}m{banner}\x1b[0m"));
        }
        None => out.push_str(banner.trim()),
    }
    out.push('\n');

    out.push_str(&render_notification(&outcome.notification));
    out
}

fn render_notification(outcome: &NotificationOutcome) -> String {
    match outcome {
        NotificationOutcome::Delivered => "✅ Notification sent to team channel".to_string(),
        NotificationOutcome::Skipped => {
            "⚠️  Webhook URL not configured; notification skipped".to_string()
        }
        NotificationOutcome::Failed {
            status: Some(status),
            reason,
        } => format!("❌ Failed to send notification (HTTP {status}): {reason}"),
        NotificationOutcome::Failed {
            status: None,
            reason,
        } => format!("❌ Failed to send notification: {reason}"),
    }
}

/// Render a pipeline failure. The user is expected to resubmit.
pub fn render_error(err: &PipelineError) -> String {
    match err {
        PipelineError::EmptyMessage => "⚠️  Please enter a message.".to_string(),
        other => format!("❌ {other}. Please try again."),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::channels::WebhookNotifier;
    use crate::error::LlmError;
    use crate::llm::provider::{
        CompletionRequest, CompletionResponse, FinishReason, LlmProvider, Role,
    };
    use crate::pipeline::{Category, Translation};

    fn outcome(original: &str, translated: &str, label: &str) -> PipelineOutcome {
        let category = Category::from_response(label);
        PipelineOutcome {
            message: InboundMessage::new(original),
            translation: Translation::new(translated),
            color: category.color(),
            category,
            notification: NotificationOutcome::Skipped,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn shows_translation_only_when_different() {
        let rendered = render_outcome(
            &outcome("Où est ma commande ?", "Where is my order?", "order tracking"),
            false,
        );
        assert!(rendered.starts_with("Translated Message: Where is my order?\n"));
        assert!(rendered.contains("Prediction: Order Tracking"));

        let rendered = render_outcome(
            &outcome("where is my order?", "Where is my order?", "order tracking"),
            false,
        );
        assert!(!rendered.contains("Translated Message"));
    }

    #[test]
    fn colored_banner_uses_category_rgb() {
        let rendered = render_outcome(
            &outcome("Where is my order?", "Where is my order?", "order tracking"),
            true,
        );
        // #90EE90 → 144;238;144
        assert!(rendered.contains("48;2;144;238;144m"));
        assert!(rendered.contains("\x1b[0m"));
    }

    #[test]
    fn unknown_category_gets_white_banner() {
        let rendered = render_outcome(
            &outcome("The box is crushed", "The box is crushed", "shipping complaint"),
            true,
        );
        assert!(rendered.contains("48;2;255;255;255m"));
        assert!(rendered.contains("Prediction: Shipping Complaint"));
    }

    #[test]
    fn notification_lines() {
        assert!(render_notification(&NotificationOutcome::Delivered).contains("sent"));
        assert!(render_notification(&NotificationOutcome::Skipped).contains("not configured"));
        assert!(
            render_notification(&NotificationOutcome::Failed {
                status: Some(403),
                reason: "invalid_token".into()
            })
            .contains("HTTP 403")
        );
        assert!(
            render_notification(&NotificationOutcome::Failed {
                status: None,
                reason: "connection refused".into()
            })
            .contains("connection refused")
        );
    }

    #[test]
    fn error_rendering() {
        assert!(render_error(&PipelineError::EmptyMessage).contains("enter a message"));
        let err = PipelineError::Translation(LlmError::AuthFailed {
            provider: "openai".into(),
        });
        let rendered = render_error(&err);
        assert!(rendered.contains("Translation failed"));
        assert!(rendered.contains("try again"));
    }

    /// Echo translation; classifier answers "general questions" unless the
    /// text mentions "fail", in which case translation errors out.
    struct EchoLlm;

    #[async_trait::async_trait]
    impl LlmProvider for EchoLlm {
        fn model_name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            let content = if request.messages[0].role == Role::System {
                "general questions".to_string()
            } else {
                let prompt = &request.messages[0].content;
                if prompt.contains("fail") {
                    return Err(LlmError::RequestFailed {
                        provider: "echo".into(),
                        reason: "scripted failure".into(),
                    });
                }
                prompt.rsplit("Message: ").next().unwrap_or_default().to_string()
            };
            Ok(CompletionResponse {
                content,
                input_tokens: 0,
                output_tokens: 0,
                finish_reason: FinishReason::Stop,
            })
        }
    }

    #[tokio::test]
    async fn repl_counts_and_stops_at_quit() {
        let pipeline =
            IntentPipeline::new(Arc::new(EchoLlm), Arc::new(WebhookNotifier::new(None)));
        let cli = CliChannel::new(false);
        let input: &[u8] = b"hello there\n\n   \nplease fail\nanother one\n/quit\nnever read\n";

        let stats = cli
            .run_lines(&pipeline, BufReader::new(input))
            .await
            .unwrap();

        assert_eq!(
            stats,
            SessionStats {
                processed: 2,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn repl_stops_at_eof() {
        let pipeline =
            IntentPipeline::new(Arc::new(EchoLlm), Arc::new(WebhookNotifier::new(None)));
        let cli = CliChannel::new(false);
        let input: &[u8] = b"only line";

        let stats = cli
            .run_lines(&pipeline, BufReader::new(input))
            .await
            .unwrap();
        assert_eq!(stats.processed, 1);
    }
}
