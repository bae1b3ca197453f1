//! Driving port used by outbox adapters to apply stats events.

use async_trait::async_trait;

use crate::domain::{Error, StatsEvent};

/// Applies stats events to profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsCommand: Send + Sync {
    /// Apply the adjustment implied by `event`.
    async fn apply(&self, event: &StatsEvent) -> Result<(), Error>;
}
