//! Driving port for reading gigs.

use async_trait::async_trait;

use crate::domain::{Error, Gig, GigId};

/// Read-side gig use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GigQuery: Send + Sync {
    /// All gigs, newest first.
    async fn list(&self) -> Result<Vec<Gig>, Error>;

    /// One gig, or `NotFound`.
    async fn get(&self, id: &GigId) -> Result<Gig, Error>;
}
