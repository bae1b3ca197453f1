//! Driven port for exchange request persistence.

use async_trait::async_trait;

use crate::domain::{
    EmailAddress, ExchangeRequest, ExchangeRequestDraft, ExchangeRequestId, RequestStatus,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exchange request repository adapters.
    pub enum ExchangeRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "exchange request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "exchange request repository query failed: {message}",
    }
}

/// Storage for exchange requests.
///
/// All list operations return records newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestRepository: Send + Sync {
    /// Store a new request with status `pending`.
    async fn insert(
        &self,
        draft: &ExchangeRequestDraft,
    ) -> Result<ExchangeRequest, ExchangeRequestRepositoryError>;

    /// Fetch one request.
    async fn find_by_id(
        &self,
        id: &ExchangeRequestId,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Set `next` only while the stored status still equals `expected`.
    ///
    /// Returns `None` when the record is missing or its status moved on.
    async fn update_status(
        &self,
        id: &ExchangeRequestId,
        expected: RequestStatus,
        next: RequestStatus,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Requests addressed to `email` by someone else.
    async fn list_received(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Requests sent by `email`.
    async fn list_sent(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Every request.
    async fn list_all(&self) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError>;
}
