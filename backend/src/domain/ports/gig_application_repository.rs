//! Driven port for gig application persistence.

use async_trait::async_trait;

use crate::domain::{
    EmailAddress, GigApplication, GigApplicationDraft, GigApplicationId, GigId, RequestStatus,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by gig application repository adapters.
    pub enum GigApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "gig application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "gig application repository query failed: {message}",
        /// The applicant already applied to this gig.
        Duplicate { gig_id: String, applicant_email: String } =>
            "{applicant_email} already applied to gig {gig_id}",
    }
}

/// Storage for gig applications.
///
/// Adapters must enforce that `(gig_id, applicant_email)` is unique and report
/// violations as [`GigApplicationRepositoryError::Duplicate`]. All list
/// operations return records newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GigApplicationRepository: Send + Sync {
    /// Store a new application with status `pending`.
    async fn insert(
        &self,
        draft: &GigApplicationDraft,
    ) -> Result<GigApplication, GigApplicationRepositoryError>;

    /// Fetch one application.
    async fn find_by_id(
        &self,
        id: &GigApplicationId,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError>;

    /// Fetch the application `applicant` made to `gig_id`, if any.
    async fn find_by_gig_and_applicant(
        &self,
        gig_id: &GigId,
        applicant: &EmailAddress,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError>;

    /// Set `next` only while the stored status still equals `expected`.
    ///
    /// Returns `None` when the record is missing or its status moved on.
    async fn update_status(
        &self,
        id: &GigApplicationId,
        expected: RequestStatus,
        next: RequestStatus,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError>;

    /// Applications to gigs owned by `owner`, excluding the owner's own.
    async fn list_received(
        &self,
        owner: &EmailAddress,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError>;

    /// Applications made by `applicant`.
    async fn list_sent(
        &self,
        applicant: &EmailAddress,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError>;

    /// Applications to one gig.
    async fn list_for_gig(
        &self,
        gig_id: &GigId,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError>;

    /// Every application.
    async fn list_all(&self) -> Result<Vec<GigApplication>, GigApplicationRepositoryError>;
}
