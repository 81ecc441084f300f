//! Pipeline services and external capability adapters

pub mod churn;
pub mod freshdesk;
pub mod pipeline;
pub mod reply;
pub mod sentiment;
pub mod transcription;
pub mod translation;

pub use freshdesk::FreshdeskClient;
pub use pipeline::{AnalysisPipeline, ProcessOutcome, TicketUpdateOutcome};
pub use sentiment::HfSentimentClient;
pub use transcription::WhisperApiClient;
pub use translation::LibreTranslateClient;
