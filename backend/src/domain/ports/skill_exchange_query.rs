//! Driving port for reading skill-exchange entries.

use async_trait::async_trait;

use crate::domain::{Error, SkillExchange};

/// Read-side skill-exchange use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillExchangeQuery: Send + Sync {
    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<SkillExchange>, Error>;

    /// Number of stored entries.
    async fn count(&self) -> Result<u64, Error>;
}
