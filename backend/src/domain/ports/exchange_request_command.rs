//! Driving port for the exchange request lifecycle.

use async_trait::async_trait;

use crate::domain::{Error, ExchangeRequest, ExchangeRequestId, RequestStatus};

/// Caller-supplied fields for a new exchange request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeRequestSubmission {
    /// Sender identity, raw.
    pub from_email: String,
    /// Recipient identity, raw.
    pub to_email: String,
    /// Optional note.
    pub message: Option<String>,
}

/// Write-side exchange request use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestCommand: Send + Sync {
    /// Create a `pending` request and credit the sender's `skillExchanges`.
    async fn create(&self, submission: ExchangeRequestSubmission)
    -> Result<ExchangeRequest, Error>;

    /// Move a request to `status`.
    ///
    /// The first move into `accepted` credits the recipient's
    /// `skillExchangesCompleted`.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids; `Conflict` when the transition policy
    /// forbids the move.
    async fn update_status(
        &self,
        id: &ExchangeRequestId,
        status: RequestStatus,
    ) -> Result<ExchangeRequest, Error>;
}
