//! Analysis API handler
//!
//! POST /analyze accepts the multipart submission form (audio clip,
//! optional description, ticket id), runs the pipeline synchronously, and
//! returns the full analysis plus the helpdesk outcome in one response.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::types::Submission;
use crate::AppState;

/// Upload formats accepted by the form
const ACCEPTED_EXTENSIONS: [&str; 2] = ["mp3", "wav"];

/// POST /analyze response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Final text: transcript, translation, or the failure sentinel
    pub transcript: String,
    /// Detected language code
    pub language: String,
    pub sentiment: SentimentSummary,
    pub churn_score: f32,
    /// Note body that was posted (or attempted)
    pub note_body: String,
    pub freshdesk: FreshdeskOutcome,
}

#[derive(Debug, Serialize)]
pub struct SentimentSummary {
    pub label: String,
    pub confidence: f32,
}

/// Helpdesk delivery result, reported in-band so analysis results still
/// render when the note was rejected
#[derive(Debug, Serialize)]
pub struct FreshdeskOutcome {
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// POST /analyze
///
/// Synchronous request-response: the connection is held open for the full
/// pipeline run. Transcription/sentiment failures map to 502, bad form
/// input to 400; a rejected helpdesk update is still a 200 with
/// `freshdesk.updated = false`.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<AnalyzeResponse>> {
    let submission = parse_submission(multipart).await?;

    let outcome = match state.pipeline.process(submission).await {
        Ok(outcome) => outcome,
        Err(err) => {
            *state.last_error.write().await = Some(err.to_string());
            return Err(err.into());
        }
    };

    Ok(Json(AnalyzeResponse {
        transcript: outcome.analysis.final_text,
        language: outcome.analysis.language,
        sentiment: SentimentSummary {
            label: outcome.analysis.sentiment.label.to_string(),
            confidence: outcome.analysis.sentiment.confidence,
        },
        churn_score: outcome.analysis.churn_score,
        note_body: outcome.note_body,
        freshdesk: FreshdeskOutcome {
            updated: outcome.ticket.updated,
            status: outcome.ticket.status,
            detail: outcome.ticket.detail,
        },
    }))
}

/// Pull the submission out of the multipart form
///
/// Expected fields: `audio` (file), `description` (optional text),
/// `ticket_id` (positive integer).
async fn parse_submission(mut multipart: Multipart) -> Result<Submission, ApiError> {
    let mut audio: Option<Vec<u8>> = None;
    let mut description = String::new();
    let mut ticket_id: Option<u64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                if let Some(file_name) = field.file_name() {
                    validate_extension(file_name)?;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read audio: {}", e)))?;
                audio = Some(bytes.to_vec());
            }
            "description" => {
                description = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read description: {}", e)))?;
            }
            "ticket_id" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read ticket_id: {}", e)))?;
                let parsed: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid ticket_id: {}", raw)))?;
                ticket_id = Some(parsed);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    let audio = audio
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Please upload an audio file to proceed".to_string()))?;

    let ticket_id = ticket_id
        .ok_or_else(|| ApiError::BadRequest("ticket_id is required".to_string()))?;
    if ticket_id == 0 {
        return Err(ApiError::BadRequest(
            "ticket_id must be a positive integer".to_string(),
        ));
    }

    Ok(Submission {
        audio,
        description,
        ticket_id,
    })
}

/// Reject uploads that are not MP3/WAV by file extension
fn validate_extension(file_name: &str) -> Result<(), ApiError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Unsupported audio format: {} (expected MP3 or WAV)",
            file_name
        )))
    }
}

/// Build analyze routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_validation() {
        assert!(validate_extension("call.mp3").is_ok());
        assert!(validate_extension("CALL.WAV").is_ok());
        assert!(validate_extension("notes.txt").is_err());
        assert!(validate_extension("mp3").is_err(), "No extension present");
    }
}
