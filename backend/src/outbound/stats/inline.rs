//! Synchronous stats outbox.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::StatsEvent;
use crate::domain::ports::{StatsCommand, StatsOutbox, StatsOutboxError};

/// Applies each event immediately through a [`StatsCommand`].
#[derive(Clone)]
pub struct InlineStatsOutbox {
    command: Arc<dyn StatsCommand>,
}

impl InlineStatsOutbox {
    /// Wrap the command that applies events.
    pub fn new(command: Arc<dyn StatsCommand>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl StatsOutbox for InlineStatsOutbox {
    async fn publish(&self, event: StatsEvent) -> Result<(), StatsOutboxError> {
        self.command
            .apply(&event)
            .await
            .map_err(|err| StatsOutboxError::apply(err.message()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockStatsCommand;
    use crate::domain::{EmailAddress, Error};

    fn event() -> StatsEvent {
        StatsEvent::GigPosted {
            owner: EmailAddress::new("u1@x.com").expect("valid email"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn publish_applies_before_returning() {
        let mut command = MockStatsCommand::new();
        command
            .expect_apply()
            .withf(|applied| *applied == event())
            .times(1)
            .return_once(|_| Ok(()));

        let outbox = InlineStatsOutbox::new(Arc::new(command));
        outbox.publish(event()).await.expect("applied");
    }

    #[rstest]
    #[tokio::test]
    async fn apply_failure_is_reported() {
        let mut command = MockStatsCommand::new();
        command
            .expect_apply()
            .times(1)
            .return_once(|_| Err(Error::service_unavailable("profile store down")));

        let outbox = InlineStatsOutbox::new(Arc::new(command));
        let err = outbox.publish(event()).await.expect_err("apply failed");
        assert_eq!(err, StatsOutboxError::apply("profile store down"));
    }
}
