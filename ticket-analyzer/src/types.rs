//! Core types and trait definitions for ticket-analyzer
//!
//! Defines the port traits the analysis pipeline is wired from:
//! - **Transcriber** - speech-to-text on the uploaded clip
//! - **Translator** - Hindi transcript normalization
//! - **SentimentAnalyzer** - text classification
//! - **TicketNotifier** - helpdesk note delivery
//!
//! Production implementations live in `services/`; tests substitute mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Common Types
// ============================================================================

/// A single form submission, transient for the duration of one request
#[derive(Debug, Clone)]
pub struct Submission {
    /// Raw uploaded audio bytes (MP3/WAV)
    pub audio: Vec<u8>,
    /// Optional free-text ticket description
    pub description: String,
    /// Helpdesk ticket identifier (positive integer)
    pub ticket_id: u64,
}

/// Output of the speech-to-text adapter, immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Recognized text, whitespace-trimmed
    pub text: String,
    /// Detected ISO 639-1 language code guess (e.g. "en", "hi")
    pub language: String,
}

/// Discrete sentiment classifier label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    /// Whatever else the underlying model emits (e.g. "NEUTRAL")
    Other(String),
}

impl SentimentLabel {
    /// Normalize a raw model label ("POSITIVE", "negative", ...)
    pub fn from_model_label(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "POSITIVE" => SentimentLabel::Positive,
            "NEGATIVE" => SentimentLabel::Negative,
            _ => SentimentLabel::Other(raw.to_ascii_uppercase()),
        }
    }

    /// Canonical upper-case form used in note bodies and responses
    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Other(s) => s,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output: a label plus its confidence
#[derive(Debug, Clone)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Confidence score, clamped to 0.0-1.0
    pub confidence: f32,
}

impl Sentiment {
    pub fn new(label: SentimentLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Typed translation result: callers decide how to react to an unavailable
/// translation instead of receiving a silently substituted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    Unavailable,
}

/// Everything derived from one submission, computed deterministically from
/// the transcription plus the form fields
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Final text, possibly translated, possibly the failure sentinel
    pub final_text: String,
    /// Detected language code from transcription
    pub language: String,
    pub sentiment: Sentiment,
    /// Heuristic attrition risk, clamped to 0.1-1.0
    pub churn_score: f32,
}

/// A helpdesk ticket note ready for delivery; sent once, never stored
#[derive(Debug, Clone, Serialize)]
pub struct ReplyNote {
    pub body: String,
    pub private: bool,
}

// ============================================================================
// Errors
// ============================================================================

/// Pipeline-aborting failures
///
/// Translation failure is deliberately absent: it degrades to a sentinel
/// final text and the pipeline continues.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// I/O error (temp file write, audio read)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Speech-to-text adapter failure
    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// Text classification adapter failure
    #[error("Sentiment analysis failed: {0}")]
    Sentiment(String),
}

/// Ticket note delivery failure, kept distinct from pipeline errors so the
/// analysis results still reach the caller
#[derive(Debug, Error)]
pub enum NoteDeliveryError {
    /// Endpoint answered with a non-success status; raw body is echoed back
    #[error("Helpdesk returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),
}

// ============================================================================
// Port Traits
// ============================================================================

/// Speech-to-text port
///
/// Input is a path to the scoped temp file holding the uploaded clip.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<TranscriptionResult, PipelineError>;
}

/// Translation port for Hindi transcripts
///
/// Infallible by signature: any backend failure maps to
/// [`TranslationOutcome::Unavailable`] inside the implementation.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> TranslationOutcome;
}

/// Text classification port
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Sentiment, PipelineError>;
}

/// Helpdesk note delivery port
#[async_trait]
pub trait TicketNotifier: Send + Sync {
    async fn add_note(&self, ticket_id: u64, note: &ReplyNote) -> Result<(), NoteDeliveryError>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_normalization() {
        assert_eq!(
            SentimentLabel::from_model_label("POSITIVE"),
            SentimentLabel::Positive
        );
        assert_eq!(
            SentimentLabel::from_model_label("negative"),
            SentimentLabel::Negative
        );
        assert_eq!(
            SentimentLabel::from_model_label("neutral"),
            SentimentLabel::Other("NEUTRAL".to_string())
        );
    }

    #[test]
    fn test_label_display() {
        assert_eq!(SentimentLabel::Negative.to_string(), "NEGATIVE");
        assert_eq!(
            SentimentLabel::Other("MIXED".to_string()).to_string(),
            "MIXED"
        );
    }

    #[test]
    fn test_sentiment_confidence_clamping() {
        let s = Sentiment::new(SentimentLabel::Positive, 1.5);
        assert_eq!(s.confidence, 1.0, "Should clamp to 1.0");

        let s = Sentiment::new(SentimentLabel::Positive, -0.5);
        assert_eq!(s.confidence, 0.0, "Should clamp to 0.0");
    }
}
