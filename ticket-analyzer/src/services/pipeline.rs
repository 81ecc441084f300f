//! Analysis pipeline orchestrator
//!
//! Runs one submission through the full flow:
//! transcription -> translation (Hindi only) -> sentiment -> churn scoring
//! -> reply formatting -> helpdesk note delivery.
//!
//! # Error Handling
//! - Transcription, sentiment, and I/O failures abort the pipeline.
//! - Translation failure degrades to a sentinel final text and continues.
//! - Note delivery failure is reported in the outcome, not as an error, so
//!   the analysis results still reach the caller.
//!
//! The uploaded clip lives in a `NamedTempFile` scoped to this call; the
//! file is removed on drop on both success and error paths.

use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::services::{churn, reply};
use crate::types::{
    AnalysisResult, PipelineError, SentimentAnalyzer, Submission, TicketNotifier,
    TranslationOutcome, Transcriber, Translator,
};

/// Final text substituted when the translation backend is unavailable
pub const TRANSLATION_FAILED_SENTINEL: &str = "(Translation failed)";

/// Language code that routes a transcript through translation
const HINDI: &str = "hi";

/// Outcome of the helpdesk update step
#[derive(Debug, Clone)]
pub struct TicketUpdateOutcome {
    pub updated: bool,
    /// HTTP status when the endpoint answered with a failure
    pub status: Option<u16>,
    /// Raw response body or network error, echoed back for display
    pub detail: Option<String>,
}

/// Everything a completed pipeline run produces
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub analysis: AnalysisResult,
    /// The note body that was sent (or attempted)
    pub note_body: String,
    pub ticket: TicketUpdateOutcome,
}

/// Pipeline over injected adapter handles; one instance is shared across
/// requests and holds no per-request state
pub struct AnalysisPipeline {
    transcriber: Arc<dyn Transcriber>,
    translator: Arc<dyn Translator>,
    sentiment: Arc<dyn SentimentAnalyzer>,
    notifier: Arc<dyn TicketNotifier>,
}

impl AnalysisPipeline {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        translator: Arc<dyn Translator>,
        sentiment: Arc<dyn SentimentAnalyzer>,
        notifier: Arc<dyn TicketNotifier>,
    ) -> Self {
        Self {
            transcriber,
            translator,
            sentiment,
            notifier,
        }
    }

    /// Process one submission end to end
    pub async fn process(&self, submission: Submission) -> Result<ProcessOutcome, PipelineError> {
        info!(
            ticket_id = submission.ticket_id,
            audio_bytes = submission.audio.len(),
            "Starting analysis pipeline"
        );

        // Step 1: persist the clip to a scoped temp file
        let mut audio_file = tempfile::Builder::new()
            .prefix("ticket-audio-")
            .suffix(".mp3")
            .tempfile()?;
        audio_file.write_all(&submission.audio)?;
        audio_file.flush()?;

        // Step 2: transcription
        let transcription = self.transcriber.transcribe(audio_file.path()).await?;
        debug!(
            language = %transcription.language,
            text_length = transcription.text.len(),
            "Transcription step complete"
        );

        // Step 3: translation, only for Hindi transcripts
        let final_text = if transcription.language == HINDI {
            match self.translator.translate(&transcription.text).await {
                TranslationOutcome::Translated(text) => text,
                TranslationOutcome::Unavailable => {
                    warn!("Translation unavailable, substituting sentinel text");
                    TRANSLATION_FAILED_SENTINEL.to_string()
                }
            }
        } else {
            transcription.text.clone()
        };

        // Step 4: sentiment over description + final transcript
        let combined_text = format!("{}\n{}", submission.description.trim(), final_text);
        let sentiment = self.sentiment.analyze(&combined_text).await?;

        // Step 5: churn heuristic
        let churn_score = churn::churn_score(&sentiment.label, &combined_text);
        debug!(
            label = %sentiment.label,
            confidence = sentiment.confidence,
            churn_score,
            "Scoring complete"
        );

        let analysis = AnalysisResult {
            final_text,
            language: transcription.language,
            sentiment,
            churn_score,
        };

        // Step 6: format and deliver the reply note
        let note = reply::build_reply(submission.ticket_id, &analysis);
        let ticket = match self.notifier.add_note(submission.ticket_id, &note).await {
            Ok(()) => TicketUpdateOutcome {
                updated: true,
                status: None,
                detail: None,
            },
            Err(crate::types::NoteDeliveryError::Http { status, body }) => {
                warn!(ticket_id = submission.ticket_id, status, "Ticket update rejected");
                TicketUpdateOutcome {
                    updated: false,
                    status: Some(status),
                    detail: Some(body),
                }
            }
            Err(crate::types::NoteDeliveryError::Network(reason)) => {
                warn!(ticket_id = submission.ticket_id, reason = %reason, "Ticket update unreachable");
                TicketUpdateOutcome {
                    updated: false,
                    status: None,
                    detail: Some(reason),
                }
            }
        };

        info!(
            ticket_id = submission.ticket_id,
            updated = ticket.updated,
            "Analysis pipeline complete"
        );

        Ok(ProcessOutcome {
            analysis,
            note_body: note.body,
            ticket,
        })
        // audio_file dropped here; the temp file is deleted
    }
}
