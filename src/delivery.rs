//! Outbound note delivery.
//!
//! Hands the finished note verbatim to an external delivery endpoint keyed
//! by a contact identifier. Contact formatting and retry policy belong to
//! the receiving service, so this is a single-attempt client.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Timeout for the delivery request
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to reach delivery endpoint: {0}")]
    Unreachable(String),

    #[error("Delivery endpoint rejected the note: {0}")]
    Rejected(String),
}

/// Payload handed to the delivery endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotePayload {
    pub contact: String,
    pub note: String,
}

/// Confirmation returned once the endpoint accepts the note
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub contact: String,
    pub status: u16,
}

/// POST the note to the delivery webhook. Single attempt, no retries.
pub async fn deliver_note(
    client: &reqwest::Client,
    url: &str,
    contact: &str,
    note: &str,
) -> Result<DeliveryReceipt, DeliveryError> {
    let payload = NotePayload {
        contact: contact.to_string(),
        note: note.to_string(),
    };

    let response = client
        .post(url)
        .timeout(DELIVERY_TIMEOUT)
        .json(&payload)
        .send()
        .await
        .map_err(|e| DeliveryError::Unreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DeliveryError::Rejected(format!("{} - {}", status, body)));
    }

    info!("Note delivered for contact {} ({})", contact, status);
    Ok(DeliveryReceipt {
        contact: contact.to_string(),
        status: status.as_u16(),
    })
}
