//! Candidates applying to posted gigs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EmailAddress, GigApplicationId, GigId, RequestStatus};

/// A stored gig application.
///
/// `gig_title` and `gig_owner_email` are copied from the gig when the
/// application is created and are never refreshed afterwards. They describe
/// the gig as the applicant saw it, so later edits or deletion of the gig do
/// not change them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigApplication {
    /// Store-assigned identifier.
    pub id: GigApplicationId,
    /// Gig applied to.
    pub gig_id: GigId,
    /// Gig title at application time.
    pub gig_title: String,
    /// Gig owner at application time; anonymous gigs have none.
    pub gig_owner_email: Option<EmailAddress>,
    /// Candidate identity.
    pub applicant_email: EmailAddress,
    /// Optional cover note.
    pub message: Option<String>,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// Creation instant assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Last update instant assigned by the store.
    pub updated_at: DateTime<Utc>,
}

/// Validated application ready to be stored with status `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GigApplicationDraft {
    /// Gig applied to.
    pub gig_id: GigId,
    /// Snapshot of the gig title.
    pub gig_title: String,
    /// Snapshot of the gig owner.
    pub gig_owner_email: Option<EmailAddress>,
    /// Candidate identity.
    pub applicant_email: EmailAddress,
    /// Optional cover note.
    pub message: Option<String>,
}
