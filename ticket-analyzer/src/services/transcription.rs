//! Speech-to-text client
//!
//! Uploads the scoped audio file to an OpenAI-compatible
//! `/v1/audio/transcriptions` endpoint (e.g. a local whisper server) and
//! returns the recognized text plus the detected language code.
//!
//! # API Reference
//! - Request: multipart form with `file`, `model`, `response_format=verbose_json`
//! - Response: JSON with `text` and `language` fields

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::types::{PipelineError, TranscriptionResult, Transcriber};

/// Default timeout for transcription requests; inference on a multi-minute
/// clip is the slowest call in the pipeline
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Model name sent with the request; whisper servers accept their loaded
/// model name here
const DEFAULT_MODEL: &str = "whisper-1";

/// Speech-to-text HTTP client
pub struct WhisperApiClient {
    http_client: Client,
    endpoint: String,
    model: String,
}

impl WhisperApiClient {
    /// Create a new client for the given transcription endpoint
    pub fn new(endpoint: String) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model name sent to the endpoint
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl Transcriber for WhisperApiClient {
    async fn transcribe(&self, audio_path: &Path) -> Result<TranscriptionResult, PipelineError> {
        let audio_bytes = tokio::fs::read(audio_path).await?;

        debug!(
            endpoint = %self.endpoint,
            byte_count = audio_bytes.len(),
            "Uploading audio for transcription"
        );

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(audio_bytes).file_name(file_name))
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PipelineError::Transcription(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Transcription(format!(
                "endpoint returned {}: {}",
                status, body
            )));
        }

        let payload: VerboseTranscription = response.json().await.map_err(|e| {
            PipelineError::Transcription(format!("failed to parse response: {}", e))
        })?;

        let result = TranscriptionResult {
            text: payload.text.trim().to_string(),
            language: payload.language.unwrap_or_else(|| "unknown".to_string()),
        };

        debug!(
            text_length = result.text.len(),
            language = %result.language,
            "Transcription complete"
        );

        Ok(result)
    }
}

// ============================================================================
// Transcription API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    /// Detected language; absent when the server was pinned to one language
    language: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
