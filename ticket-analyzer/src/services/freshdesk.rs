//! Freshdesk ticket update client
//!
//! Posts the formatted reply note to `{base_url}/tickets/{id}/notes` with
//! basic auth (API key as username, "X" as password, per Freshdesk docs).
//! HTTP 200/201 counts as success; any other status surfaces the raw
//! response body so the caller can display it. One shot: no retry, no
//! idempotency key, so a resubmission creates a duplicate note.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::types::{NoteDeliveryError, ReplyNote, TicketNotifier};

/// Default timeout for Freshdesk API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Freshdesk REST client
pub struct FreshdeskClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl FreshdeskClient {
    /// Create a client for a tenant base URL, e.g.
    /// `https://example.freshdesk.com/api/v2`
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn note_url(&self, ticket_id: u64) -> String {
        format!("{}/tickets/{}/notes", self.base_url, ticket_id)
    }
}

#[async_trait]
impl TicketNotifier for FreshdeskClient {
    async fn add_note(&self, ticket_id: u64, note: &ReplyNote) -> Result<(), NoteDeliveryError> {
        let url = self.note_url(ticket_id);
        debug!(ticket_id, url = %url, body_length = note.body.len(), "Posting ticket note");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.api_key, Some("X"))
            .json(note)
            .send()
            .await
            .map_err(|e| NoteDeliveryError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 200 || status.as_u16() == 201 {
            info!(ticket_id, status = status.as_u16(), "Ticket note created");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NoteDeliveryError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
