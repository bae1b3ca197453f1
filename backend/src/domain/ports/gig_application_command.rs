//! Driving port for the gig application lifecycle.

use async_trait::async_trait;

use crate::domain::{Error, GigApplication, GigApplicationId, GigId, RequestStatus};

/// Caller-supplied fields for a new application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GigApplicationSubmission {
    /// Gig being applied to.
    pub gig_id: GigId,
    /// Candidate identity, raw.
    pub applicant_email: String,
    /// Optional cover note.
    pub message: Option<String>,
}

/// Write-side gig application use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GigApplicationCommand: Send + Sync {
    /// Apply to a gig.
    ///
    /// # Errors
    ///
    /// `NotFound` when the gig is absent, `InvalidRequest` when the applicant
    /// owns the gig, `Conflict` when the applicant already applied.
    async fn create(
        &self,
        submission: GigApplicationSubmission,
    ) -> Result<GigApplication, Error>;

    /// Move an application to `status`.
    async fn update_status(
        &self,
        id: &GigApplicationId,
        status: RequestStatus,
    ) -> Result<GigApplication, Error>;
}
