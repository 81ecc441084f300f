//! Translation client for Hindi transcripts
//!
//! Posts to a LibreTranslate-compatible endpoint to normalize Hindi text to
//! English before sentiment scoring. The port returns a typed outcome: any
//! backend failure maps to `TranslationOutcome::Unavailable` so the caller
//! reacts deliberately instead of receiving a silently substituted string.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::{TranslationOutcome, Translator};

/// Default timeout for translation requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Source language (transcripts are routed here only when whisper detects Hindi)
const SOURCE_LANGUAGE: &str = "hi";

/// Target language for the downstream English sentiment model
const TARGET_LANGUAGE: &str = "en";

/// LibreTranslate-style translation client
pub struct LibreTranslateClient {
    http_client: Client,
    endpoint: String,
}

impl LibreTranslateClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint,
        }
    }

    async fn request_translation(&self, text: &str) -> Result<String, String> {
        let request = TranslateRequest {
            q: text,
            source: SOURCE_LANGUAGE,
            target: TARGET_LANGUAGE,
            format: "text",
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("endpoint returned {}: {}", status, body));
        }

        let payload: TranslateResponse = response
            .json()
            .await
            .map_err(|e| format!("failed to parse response: {}", e))?;

        Ok(payload.translated_text)
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, text: &str) -> TranslationOutcome {
        debug!(text_length = text.len(), "Translating Hindi transcript");

        match self.request_translation(text).await {
            Ok(translated) => TranslationOutcome::Translated(translated),
            Err(reason) => {
                // Degraded, not fatal: the pipeline substitutes a sentinel
                // final text and continues
                warn!(reason = %reason, "Translation unavailable");
                TranslationOutcome::Unavailable
            }
        }
    }
}

// ============================================================================
// Translation API Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

// ============================================================================
// Tests
// ============================================================================
