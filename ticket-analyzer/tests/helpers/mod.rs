//! Shared test helpers: mock port implementations and request builders

// Each integration test binary compiles this module separately and uses a
// different subset of it
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ticket_analyzer::services::AnalysisPipeline;
use ticket_analyzer::types::{
    NoteDeliveryError, PipelineError, ReplyNote, Sentiment, SentimentAnalyzer, SentimentLabel,
    TicketNotifier, TranscriptionResult, Transcriber, TranslationOutcome, Translator,
};
use ticket_analyzer::AppState;

// ============================================================================
// Mock adapters
// ============================================================================

/// Transcriber returning a fixed transcript and language
pub struct FixedTranscriber {
    pub text: String,
    pub language: String,
}

impl FixedTranscriber {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.to_string(),
        }
    }
}

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<TranscriptionResult, PipelineError> {
        Ok(TranscriptionResult {
            text: self.text.clone(),
            language: self.language.clone(),
        })
    }
}

/// Transcriber that always fails
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<TranscriptionResult, PipelineError> {
        Err(PipelineError::Transcription("model exploded".to_string()))
    }
}

/// Translator returning a fixed translation and counting invocations
pub struct CountingTranslator {
    pub translation: String,
    pub calls: Arc<AtomicUsize>,
}

impl CountingTranslator {
    pub fn new(translation: &str) -> Self {
        Self {
            translation: translation.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for CountingTranslator {
    async fn translate(&self, _text: &str) -> TranslationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TranslationOutcome::Translated(self.translation.clone())
    }
}

/// Translator whose backend is always down
pub struct UnavailableTranslator;

#[async_trait]
impl Translator for UnavailableTranslator {
    async fn translate(&self, _text: &str) -> TranslationOutcome {
        TranslationOutcome::Unavailable
    }
}

/// Sentiment analyzer returning a fixed label, recording its input
pub struct FixedSentiment {
    pub label: SentimentLabel,
    pub confidence: f32,
    pub inputs: Arc<Mutex<Vec<String>>>,
}

impl FixedSentiment {
    pub fn new(label: SentimentLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_input(&self) -> Option<String> {
        self.inputs.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SentimentAnalyzer for FixedSentiment {
    async fn analyze(&self, text: &str) -> Result<Sentiment, PipelineError> {
        self.inputs.lock().unwrap().push(text.to_string());
        Ok(Sentiment::new(self.label.clone(), self.confidence))
    }
}

/// Notifier that accepts every note and records it
#[derive(Default)]
pub struct AcceptingNotifier {
    pub notes: Arc<Mutex<Vec<(u64, ReplyNote)>>>,
}

impl AcceptingNotifier {
    pub fn last_note(&self) -> Option<(u64, ReplyNote)> {
        self.notes.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TicketNotifier for AcceptingNotifier {
    async fn add_note(&self, ticket_id: u64, note: &ReplyNote) -> Result<(), NoteDeliveryError> {
        self.notes.lock().unwrap().push((ticket_id, note.clone()));
        Ok(())
    }
}

/// Notifier rejecting every note with a fixed HTTP failure
pub struct RejectingNotifier {
    pub status: u16,
    pub body: String,
}

#[async_trait]
impl TicketNotifier for RejectingNotifier {
    async fn add_note(&self, _ticket_id: u64, _note: &ReplyNote) -> Result<(), NoteDeliveryError> {
        Err(NoteDeliveryError::Http {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

// ============================================================================
// Construction helpers
// ============================================================================

/// Assemble a pipeline from adapter handles
pub fn pipeline_with(
    transcriber: Arc<dyn Transcriber>,
    translator: Arc<dyn Translator>,
    sentiment: Arc<dyn SentimentAnalyzer>,
    notifier: Arc<dyn TicketNotifier>,
) -> Arc<AnalysisPipeline> {
    Arc::new(AnalysisPipeline::new(
        transcriber,
        translator,
        sentiment,
        notifier,
    ))
}

/// App state over an all-success pipeline: English negative transcript,
/// everything delivered
pub fn happy_path_state() -> AppState {
    let pipeline = pipeline_with(
        Arc::new(FixedTranscriber::new(
            "I want to cancel my subscription",
            "en",
        )),
        Arc::new(CountingTranslator::new("unused")),
        Arc::new(FixedSentiment::new(SentimentLabel::Negative, 0.95)),
        Arc::new(AcceptingNotifier::default()),
    );
    AppState::new(pipeline)
}

// ============================================================================
// Multipart request builder
// ============================================================================

const BOUNDARY: &str = "------------------------test-boundary";

/// Build a `POST /analyze` multipart request from optional form fields
pub fn analyze_request(
    audio: Option<(&str, &[u8])>,
    description: Option<&str>,
    ticket_id: Option<&str>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    if let Some((file_name, bytes)) = audio {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"audio\"; filename=\"{}\"\r\n\
                 Content-Type: audio/mpeg\r\n\r\n",
                file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(text) = description {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"description\"\r\n\r\n",
        );
        body.extend_from_slice(text.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some(id) = ticket_id {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"ticket_id\"\r\n\r\n",
        );
        body.extend_from_slice(id.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
