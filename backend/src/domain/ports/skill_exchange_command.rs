//! Driving port for listing skill-exchange entries.

use async_trait::async_trait;

use crate::domain::{Error, SkillExchange, SkillExchangeSubmission};

/// Write-side skill-exchange use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillExchangeCommand: Send + Sync {
    /// Validate and store an entry, crediting the owner when one is given.
    async fn create(&self, submission: SkillExchangeSubmission) -> Result<SkillExchange, Error>;
}
