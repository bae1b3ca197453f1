//! Driving port for gig application listings.

use async_trait::async_trait;

use crate::domain::{Error, GigApplication, GigApplicationScope, RequestListing};

/// Read-side gig application use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GigApplicationQuery: Send + Sync {
    /// List applications for a scope.
    async fn list(
        &self,
        scope: GigApplicationScope,
    ) -> Result<RequestListing<GigApplication>, Error>;
}
