//! Gig catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    GigCommand, GigQuery, GigRepository, GigRepositoryError, StatsOutbox,
};
use crate::domain::stats_synchronizer::publish_stats;
use crate::domain::{Error, Gig, GigDraft, GigId, GigSubmission, StatsEvent};

/// Implements the gig driving ports over a [`GigRepository`].
#[derive(Clone)]
pub struct GigService<G> {
    gigs: Arc<G>,
    stats: Arc<dyn StatsOutbox>,
}

impl<G> GigService<G> {
    /// Create a service publishing stats events to `stats`.
    pub fn new(gigs: Arc<G>, stats: Arc<dyn StatsOutbox>) -> Self {
        Self { gigs, stats }
    }
}

pub(crate) fn map_gig_error(error: GigRepositoryError) -> Error {
    match error {
        GigRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("gig repository unavailable: {message}"))
        }
        GigRepositoryError::Query { message } => {
            Error::internal(format!("gig repository error: {message}"))
        }
    }
}

pub(crate) fn gig_not_found(id: &GigId) -> Error {
    Error::not_found(format!("gig {id} not found"))
}

#[async_trait]
impl<G> GigCommand for GigService<G>
where
    G: GigRepository,
{
    async fn create(&self, submission: GigSubmission) -> Result<Gig, Error> {
        let draft = GigDraft::try_from(submission)?;
        let gig = self.gigs.insert(&draft).await.map_err(map_gig_error)?;
        info!(id = %gig.id, "gig posted");
        if let Some(owner) = gig.posted_by.clone() {
            publish_stats(self.stats.as_ref(), StatsEvent::GigPosted { owner }).await;
        }
        Ok(gig)
    }

    async fn delete(&self, id: &GigId) -> Result<Gig, Error> {
        let removed = self
            .gigs
            .delete(id)
            .await
            .map_err(map_gig_error)?
            .ok_or_else(|| gig_not_found(id))?;
        info!(id = %removed.id, "gig deleted");
        if let Some(owner) = removed.posted_by.clone() {
            publish_stats(self.stats.as_ref(), StatsEvent::GigRemoved { owner }).await;
        }
        Ok(removed)
    }
}

#[async_trait]
impl<G> GigQuery for GigService<G>
where
    G: GigRepository,
{
    async fn list(&self) -> Result<Vec<Gig>, Error> {
        self.gigs.list().await.map_err(map_gig_error)
    }

    async fn get(&self, id: &GigId) -> Result<Gig, Error> {
        self.gigs
            .find_by_id(id)
            .await
            .map_err(map_gig_error)?
            .ok_or_else(|| gig_not_found(id))
    }
}

#[cfg(test)]
#[path = "gig_service_tests.rs"]
mod tests;
