//! Skill-exchange listing service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    SkillExchangeCommand, SkillExchangeQuery, SkillExchangeRepository,
    SkillExchangeRepositoryError, StatsOutbox,
};
use crate::domain::stats_synchronizer::publish_stats;
use crate::domain::{Error, SkillExchange, SkillExchangeDraft, SkillExchangeSubmission, StatsEvent};

/// Implements the skill-exchange driving ports.
#[derive(Clone)]
pub struct SkillExchangeService<R> {
    entries: Arc<R>,
    stats: Arc<dyn StatsOutbox>,
}

impl<R> SkillExchangeService<R> {
    /// Create a service publishing stats events to `stats`.
    pub fn new(entries: Arc<R>, stats: Arc<dyn StatsOutbox>) -> Self {
        Self { entries, stats }
    }
}

pub(crate) fn map_skill_exchange_error(error: SkillExchangeRepositoryError) -> Error {
    match error {
        SkillExchangeRepositoryError::Connection { message } => Error::service_unavailable(
            format!("skill exchange repository unavailable: {message}"),
        ),
        SkillExchangeRepositoryError::Query { message } => {
            Error::internal(format!("skill exchange repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> SkillExchangeCommand for SkillExchangeService<R>
where
    R: SkillExchangeRepository,
{
    async fn create(&self, submission: SkillExchangeSubmission) -> Result<SkillExchange, Error> {
        let draft = SkillExchangeDraft::try_from(submission)?;
        let entry = self
            .entries
            .insert(&draft)
            .await
            .map_err(map_skill_exchange_error)?;
        info!(id = %entry.id, "skill exchange listed");
        if let Some(owner) = entry.owner_email.clone() {
            publish_stats(self.stats.as_ref(), StatsEvent::ExchangeListed { owner }).await;
        }
        Ok(entry)
    }
}

#[async_trait]
impl<R> SkillExchangeQuery for SkillExchangeService<R>
where
    R: SkillExchangeRepository,
{
    async fn list(&self) -> Result<Vec<SkillExchange>, Error> {
        self.entries.list().await.map_err(map_skill_exchange_error)
    }

    async fn count(&self) -> Result<u64, Error> {
        self.entries.count().await.map_err(map_skill_exchange_error)
    }
}
