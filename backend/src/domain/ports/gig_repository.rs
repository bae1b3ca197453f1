//! Driven port for gig persistence.

use async_trait::async_trait;

use crate::domain::{Gig, GigDraft, GigId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by gig repository adapters.
    pub enum GigRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "gig repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "gig repository query failed: {message}",
    }
}

/// Storage for posted gigs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GigRepository: Send + Sync {
    /// Store a new gig, assigning its id and timestamps.
    async fn insert(&self, draft: &GigDraft) -> Result<Gig, GigRepositoryError>;

    /// All gigs, newest first.
    async fn list(&self) -> Result<Vec<Gig>, GigRepositoryError>;

    /// Fetch one gig.
    async fn find_by_id(&self, id: &GigId) -> Result<Option<Gig>, GigRepositoryError>;

    /// Remove a gig, returning the removed record when it existed.
    async fn delete(&self, id: &GigId) -> Result<Option<Gig>, GigRepositoryError>;

    /// Number of stored gigs.
    async fn count(&self) -> Result<u64, GigRepositoryError>;
}
