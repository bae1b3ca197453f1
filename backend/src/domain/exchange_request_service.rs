//! Exchange request lifecycle.
//!
//! Requests start `pending`. Status changes are planned by the configured
//! [`TransitionPolicy`] and written with a compare-and-set so two concurrent
//! decisions cannot both win. The recipient's `skillExchangesCompleted`
//! counter moves only when a request becomes accepted.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    ExchangeRequestCommand, ExchangeRequestQuery, ExchangeRequestRepository,
    ExchangeRequestRepositoryError, ExchangeRequestSubmission, StatsOutbox,
};
use crate::domain::stats_synchronizer::publish_stats;
use crate::domain::validation::require_email;
use crate::domain::{
    Error, ExchangeRequest, ExchangeRequestDraft, ExchangeRequestId, ExchangeRequestScope,
    RequestListing, RequestStatus, StatsEvent, StatusTransition, TransitionPolicy,
};

/// Implements the exchange request driving ports.
#[derive(Clone)]
pub struct ExchangeRequestService<R> {
    requests: Arc<R>,
    stats: Arc<dyn StatsOutbox>,
    policy: TransitionPolicy,
}

impl<R> ExchangeRequestService<R> {
    /// Create a service with the given transition policy.
    pub fn new(requests: Arc<R>, stats: Arc<dyn StatsOutbox>, policy: TransitionPolicy) -> Self {
        Self {
            requests,
            stats,
            policy,
        }
    }
}

fn map_request_error(error: ExchangeRequestRepositoryError) -> Error {
    match error {
        ExchangeRequestRepositoryError::Connection { message } => Error::service_unavailable(
            format!("exchange request repository unavailable: {message}"),
        ),
        ExchangeRequestRepositoryError::Query { message } => {
            Error::internal(format!("exchange request repository error: {message}"))
        }
    }
}

fn request_not_found(id: &ExchangeRequestId) -> Error {
    Error::not_found(format!("exchange request {id} not found"))
}

impl<R> ExchangeRequestService<R>
where
    R: ExchangeRequestRepository,
{
    async fn fetch(&self, id: &ExchangeRequestId) -> Result<ExchangeRequest, Error> {
        self.requests
            .find_by_id(id)
            .await
            .map_err(map_request_error)?
            .ok_or_else(|| request_not_found(id))
    }

    async fn swap_status(
        &self,
        current: &ExchangeRequest,
        next: RequestStatus,
    ) -> Result<ExchangeRequest, Error> {
        let updated = self
            .requests
            .update_status(&current.id, current.status, next)
            .await
            .map_err(map_request_error)?;
        match updated {
            Some(request) => Ok(request),
            None => {
                // Lost the compare-and-set: distinguish deletion from a race.
                self.fetch(&current.id).await?;
                Err(Error::conflict(format!(
                    "exchange request {} changed status concurrently",
                    current.id
                )))
            }
        }
    }
}

#[async_trait]
impl<R> ExchangeRequestCommand for ExchangeRequestService<R>
where
    R: ExchangeRequestRepository,
{
    async fn create(
        &self,
        submission: ExchangeRequestSubmission,
    ) -> Result<ExchangeRequest, Error> {
        let draft = ExchangeRequestDraft {
            from_email: require_email("fromEmail", &submission.from_email)?,
            to_email: require_email("toEmail", &submission.to_email)?,
            message: submission.message.unwrap_or_default(),
        };
        let request = self
            .requests
            .insert(&draft)
            .await
            .map_err(map_request_error)?;
        info!(id = %request.id, from = %request.from_email, to = %request.to_email, "exchange request sent");
        publish_stats(
            self.stats.as_ref(),
            StatsEvent::ExchangeRequested {
                sender: request.from_email.clone(),
            },
        )
        .await;
        Ok(request)
    }

    async fn update_status(
        &self,
        id: &ExchangeRequestId,
        status: RequestStatus,
    ) -> Result<ExchangeRequest, Error> {
        let current = self.fetch(id).await?;
        let first_acceptance = match self.policy.plan(current.status, status)? {
            StatusTransition::Unchanged => return Ok(current),
            StatusTransition::Apply { first_acceptance } => first_acceptance,
        };
        let updated = self.swap_status(&current, status).await?;
        info!(id = %updated.id, from = %current.status, to = %updated.status, "exchange request status changed");
        if first_acceptance {
            publish_stats(
                self.stats.as_ref(),
                StatsEvent::ExchangeAccepted {
                    recipient: updated.to_email.clone(),
                },
            )
            .await;
        }
        Ok(updated)
    }
}

#[async_trait]
impl<R> ExchangeRequestQuery for ExchangeRequestService<R>
where
    R: ExchangeRequestRepository,
{
    async fn list(
        &self,
        scope: ExchangeRequestScope,
    ) -> Result<RequestListing<ExchangeRequest>, Error> {
        match scope {
            ExchangeRequestScope::ForUser(email) => {
                let mut received = self
                    .requests
                    .list_received(&email)
                    .await
                    .map_err(map_request_error)?;
                received.retain(|request| !request.is_self_addressed());
                let sent = self
                    .requests
                    .list_sent(&email)
                    .await
                    .map_err(map_request_error)?;
                Ok(RequestListing::Inbox { received, sent })
            }
            ExchangeRequestScope::All => self
                .requests
                .list_all()
                .await
                .map(RequestListing::All)
                .map_err(map_request_error),
        }
    }
}

#[cfg(test)]
#[path = "exchange_request_service_tests.rs"]
mod tests;
