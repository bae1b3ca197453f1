//! Driving port for reading profiles.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, UserProfile};

/// Read-side profile use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the profile for `email`, or `NotFound`.
    async fn by_email(&self, email: &EmailAddress) -> Result<UserProfile, Error>;
}
