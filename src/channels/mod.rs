//! Channel abstraction for message I/O.
//!
//! Inbound: the terminal (`cli`). Outbound: the team webhook (`webhook`).

pub mod cli;
pub mod notifier;
pub mod webhook;

pub use cli::CliChannel;
pub use notifier::{NO_TRANSLATION, NotificationOutcome, NotificationPayload, Notifier};
pub use webhook::WebhookNotifier;
