//! Sentiment classification client
//!
//! Posts the combined description + transcript to a Hugging-Face-inference
//! compatible text-classification endpoint and returns the top label with
//! its confidence. The model may truncate long inputs; no pre-truncation
//! happens here.
//!
//! # API Reference
//! - Request: JSON `{"inputs": "..."}`
//! - Response: `[[{"label": "NEGATIVE", "score": 0.95}, ...]]`

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::types::{PipelineError, Sentiment, SentimentAnalyzer, SentimentLabel};

/// Default timeout for classification requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hugging-Face-inference-style sentiment client
pub struct HfSentimentClient {
    http_client: Client,
    endpoint: String,
    /// Optional bearer token for hosted inference endpoints
    api_token: Option<String>,
}

impl HfSentimentClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint,
            api_token: None,
        }
    }

    /// Attach a bearer token (required by the hosted inference API)
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

#[async_trait]
impl SentimentAnalyzer for HfSentimentClient {
    async fn analyze(&self, text: &str) -> Result<Sentiment, PipelineError> {
        debug!(text_length = text.len(), "Classifying sentiment");

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .json(&json!({ "inputs": text, "options": { "wait_for_model": true } }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PipelineError::Sentiment(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Sentiment(format!(
                "endpoint returned {}: {}",
                status, body
            )));
        }

        let payload: Vec<Vec<LabelScore>> = response
            .json()
            .await
            .map_err(|e| PipelineError::Sentiment(format!("failed to parse response: {}", e)))?;

        let sentiment = top_sentiment(payload).ok_or_else(|| {
            PipelineError::Sentiment("classifier returned no labels".to_string())
        })?;

        debug!(
            label = %sentiment.label,
            confidence = sentiment.confidence,
            "Sentiment classified"
        );

        Ok(sentiment)
    }
}

/// Pick the highest-scoring label from the classifier output
fn top_sentiment(payload: Vec<Vec<LabelScore>>) -> Option<Sentiment> {
    payload
        .into_iter()
        .next()?
        .into_iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .map(|entry| Sentiment::new(SentimentLabel::from_model_label(&entry.label), entry.score))
}

// ============================================================================
// Sentiment API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_sentiment_picks_highest_score() {
        let payload: Vec<Vec<LabelScore>> = serde_json::from_str(
            r#"[[{"label":"NEGATIVE","score":0.95},{"label":"POSITIVE","score":0.05}]]"#,
        )
        .unwrap();
        let sentiment = top_sentiment(payload).unwrap();
        assert_eq!(sentiment.label, SentimentLabel::Negative);
        assert!((sentiment.confidence - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_payload_is_none() {
        assert!(top_sentiment(vec![]).is_none());
        assert!(top_sentiment(vec![vec![]]).is_none());
    }

    #[test]
    fn test_unknown_label_is_preserved() {
        let payload = vec![vec![LabelScore {
            label: "neutral".to_string(),
            score: 0.6,
        }]];
        let sentiment = top_sentiment(payload).unwrap();
        assert_eq!(
            sentiment.label,
            SentimentLabel::Other("NEUTRAL".to_string())
        );
    }
}
