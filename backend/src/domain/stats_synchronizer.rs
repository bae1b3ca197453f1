//! Stats synchronizer: applies best-effort counter changes to profiles.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    StatsCommand, StatsOutbox, UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::{Error, StatsEvent};

/// Applies [`StatsEvent`]s through the profile repository's atomic
/// upsert-increment.
#[derive(Clone)]
pub struct StatsSynchronizer<R> {
    profiles: Arc<R>,
}

impl<R> StatsSynchronizer<R> {
    /// Create a synchronizer over the given profile repository.
    pub fn new(profiles: Arc<R>) -> Self {
        Self { profiles }
    }
}

pub(crate) fn map_profile_error(error: UserProfileRepositoryError) -> Error {
    match error {
        UserProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        UserProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> StatsCommand for StatsSynchronizer<R>
where
    R: UserProfileRepository,
{
    async fn apply(&self, event: &StatsEvent) -> Result<(), Error> {
        let adjustment = event.adjustment();
        self.profiles
            .adjust_stat(&adjustment)
            .await
            .map_err(map_profile_error)?;
        debug!(
            email = %adjustment.email,
            field = %adjustment.field,
            delta = adjustment.delta,
            "profile counter adjusted"
        );
        Ok(())
    }
}

/// Hand an event to the outbox, logging instead of failing.
///
/// Stats are a side channel: losing an event leaves a counter off by one,
/// which is preferable to failing the primary write that triggered it.
pub(crate) async fn publish_stats(outbox: &dyn StatsOutbox, event: StatsEvent) {
    let adjustment = event.adjustment();
    if let Err(error) = outbox.publish(event).await {
        warn!(
            %error,
            email = %adjustment.email,
            field = %adjustment.field,
            delta = adjustment.delta,
            "stats event dropped"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockStatsOutbox, MockUserProfileRepository, StatsOutboxError};
    use crate::domain::{EmailAddress, ErrorCode, StatField};

    fn owner() -> EmailAddress {
        EmailAddress::new("owner@x.com").expect("valid email")
    }

    #[rstest]
    #[tokio::test]
    async fn apply_forwards_adjustment_to_repository() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_adjust_stat()
            .withf(|adj| {
                adj.email.as_str() == "owner@x.com"
                    && adj.field == StatField::GigsPosted
                    && adj.delta == -1
            })
            .times(1)
            .return_once(|_| Ok(()));

        let sync = StatsSynchronizer::new(Arc::new(repo));
        sync.apply(&StatsEvent::GigRemoved { owner: owner() })
            .await
            .expect("adjustment applied");
    }

    #[rstest]
    #[case(UserProfileRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserProfileRepositoryError::query("boom"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn apply_maps_repository_errors(
        #[case] failure: UserProfileRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_adjust_stat()
            .times(1)
            .return_once(move |_| Err(failure));

        let sync = StatsSynchronizer::new(Arc::new(repo));
        let err = sync
            .apply(&StatsEvent::GigPosted { owner: owner() })
            .await
            .expect_err("repository failure surfaces");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn publish_stats_swallows_outbox_failures() {
        let mut outbox = MockStatsOutbox::new();
        outbox
            .expect_publish()
            .times(1)
            .return_once(|_| Err(StatsOutboxError::full()));

        publish_stats(&outbox, StatsEvent::GigPosted { owner: owner() }).await;
    }
}
