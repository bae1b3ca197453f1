//! Driven port for skill-exchange entry persistence.

use async_trait::async_trait;

use crate::domain::{SkillExchange, SkillExchangeDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by skill-exchange repository adapters.
    pub enum SkillExchangeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "skill exchange repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "skill exchange repository query failed: {message}",
    }
}

/// Storage for skill-exchange entries. Entries are append-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillExchangeRepository: Send + Sync {
    /// Store a new entry.
    async fn insert(
        &self,
        draft: &SkillExchangeDraft,
    ) -> Result<SkillExchange, SkillExchangeRepositoryError>;

    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<SkillExchange>, SkillExchangeRepositoryError>;

    /// Number of stored entries.
    async fn count(&self) -> Result<u64, SkillExchangeRepositoryError>;
}
