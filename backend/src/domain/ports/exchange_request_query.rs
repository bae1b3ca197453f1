//! Driving port for exchange request inboxes.

use async_trait::async_trait;

use crate::domain::{Error, ExchangeRequest, ExchangeRequestScope, RequestListing};

/// Read-side exchange request use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestQuery: Send + Sync {
    /// List requests for a scope.
    ///
    /// For a user, `received` never contains requests the user sent to
    /// themselves.
    async fn list(
        &self,
        scope: ExchangeRequestScope,
    ) -> Result<RequestListing<ExchangeRequest>, Error>;
}
