//! Driven port carrying stats events from lifecycle services to the
//! synchronizer.
//!
//! Delivery is best effort. Callers log publish failures and carry on; a lost
//! event only leaves a counter slightly off.

use async_trait::async_trait;

use crate::domain::StatsEvent;

use super::define_port_error;

define_port_error! {
    /// Reasons an event could not be handed over.
    pub enum StatsOutboxError {
        /// The buffer is full; the event was dropped.
        Full => "stats outbox is full",
        /// The consumer has shut down.
        Closed => "stats outbox is closed",
        /// The event was delivered but applying it failed.
        Apply { message: String } => "stats adjustment failed: {message}",
    }
}

/// Hand-off point for stats events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsOutbox: Send + Sync {
    /// Queue or apply one event.
    async fn publish(&self, event: StatsEvent) -> Result<(), StatsOutboxError>;
}
