//! Driving port for saving profiles.

use async_trait::async_trait;

use crate::domain::{Error, ProfileSubmission, UserProfile};

/// Write-side profile use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Create or update the profile keyed by the submission's email.
    async fn upsert(&self, submission: ProfileSubmission) -> Result<UserProfile, Error>;
}
