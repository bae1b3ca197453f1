//! Driven port for user profile persistence and counter updates.

use async_trait::async_trait;

use crate::domain::{EmailAddress, ProfileUpsert, StatAdjustment, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
    }
}

/// Storage for user profiles, unique by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Fetch the profile for an exact (normalised) email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError>;

    /// Create or update a profile in one atomic write.
    ///
    /// Absent optional fields keep their stored values. Counters are replaced
    /// only when `upsert.stats` is present; new profiles otherwise start at
    /// zero.
    async fn upsert(&self, upsert: &ProfileUpsert)
    -> Result<UserProfile, UserProfileRepositoryError>;

    /// Atomically apply a counter change, creating an empty profile first
    /// when none exists. Counters never drop below zero.
    async fn adjust_stat(
        &self,
        adjustment: &StatAdjustment,
    ) -> Result<(), UserProfileRepositoryError>;

    /// Number of stored profiles.
    async fn count(&self) -> Result<u64, UserProfileRepositoryError>;
}
