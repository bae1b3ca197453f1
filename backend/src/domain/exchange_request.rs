//! Peer-to-peer proposals to trade skills.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EmailAddress, ExchangeRequestId, RequestStatus};

/// A stored exchange request.
///
/// Repeat requests between the same pair of users are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    /// Store-assigned identifier.
    pub id: ExchangeRequestId,
    /// Sender identity.
    pub from_email: EmailAddress,
    /// Recipient identity.
    pub to_email: EmailAddress,
    /// Free-form note; empty when the sender wrote none.
    pub message: String,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// Creation instant assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Last update instant assigned by the store.
    pub updated_at: DateTime<Utc>,
}

impl ExchangeRequest {
    /// Whether the sender addressed the request to themselves.
    pub fn is_self_addressed(&self) -> bool {
        self.from_email == self.to_email
    }
}

/// Validated request ready to be stored with status `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequestDraft {
    /// Sender identity.
    pub from_email: EmailAddress,
    /// Recipient identity.
    pub to_email: EmailAddress,
    /// Note, possibly empty.
    pub message: String,
}
