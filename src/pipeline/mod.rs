//! Translate → classify → notify pipeline.
//!
//! Every inbound message flows through:
//! 1. `Translator::translate()`: any language to English
//! 2. `Classifier::classify()`: English text to a support-intent label
//! 3. `palette::color_for()`: label to display color
//! 4. `Notifier::notify()`: best-effort summary to the team channel
//!
//! Translation and classification failures abort the message. Notification
//! never does.

pub mod classifier;
pub mod palette;
pub mod processor;
pub mod translator;
pub mod types;

pub use classifier::Classifier;
pub use processor::IntentPipeline;
pub use translator::Translator;
pub use types::{Category, InboundMessage, PipelineOutcome, PipelineStage, Translation};
