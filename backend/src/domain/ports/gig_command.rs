//! Driving port for posting and removing gigs.

use async_trait::async_trait;

use crate::domain::{Error, Gig, GigId, GigSubmission};

/// Write-side gig use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GigCommand: Send + Sync {
    /// Validate and store a gig, crediting the owner's `gigsPosted`.
    async fn create(&self, submission: GigSubmission) -> Result<Gig, Error>;

    /// Delete a gig, debiting the owner's `gigsPosted`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::NotFound`] when the gig is absent.
    async fn delete(&self, id: &GigId) -> Result<Gig, Error>;
}
