//! Gig application lifecycle.
//!
//! An application snapshots the gig's title and owner when it is created.
//! Later edits to the gig do not reach existing applications.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::gig_service::{gig_not_found, map_gig_error};
use crate::domain::ports::{
    GigApplicationCommand, GigApplicationQuery, GigApplicationRepository,
    GigApplicationRepositoryError, GigApplicationSubmission, GigRepository,
};
use crate::domain::validation::{optional_text, require_email};
use crate::domain::{
    EmailAddress, Error, Gig, GigApplication, GigApplicationDraft, GigApplicationId,
    GigApplicationScope, GigId, RequestListing, RequestStatus, StatusTransition, TransitionPolicy,
};

/// Implements the gig application driving ports.
#[derive(Clone)]
pub struct GigApplicationService<A, G> {
    applications: Arc<A>,
    gigs: Arc<G>,
    policy: TransitionPolicy,
}

impl<A, G> GigApplicationService<A, G> {
    /// Create a service resolving gigs through `gigs`.
    pub fn new(applications: Arc<A>, gigs: Arc<G>, policy: TransitionPolicy) -> Self {
        Self {
            applications,
            gigs,
            policy,
        }
    }
}

fn duplicate_application(gig_id: &str, applicant: &str) -> Error {
    Error::conflict("You have already applied to this gig").with_details(json!({
        "gigId": gig_id,
        "applicantEmail": applicant,
        "code": "duplicate_application",
    }))
}

fn map_application_error(error: GigApplicationRepositoryError) -> Error {
    match error {
        GigApplicationRepositoryError::Connection { message } => Error::service_unavailable(
            format!("gig application repository unavailable: {message}"),
        ),
        GigApplicationRepositoryError::Query { message } => {
            Error::internal(format!("gig application repository error: {message}"))
        }
        GigApplicationRepositoryError::Duplicate {
            gig_id,
            applicant_email,
        } => duplicate_application(&gig_id, &applicant_email),
    }
}

fn application_not_found(id: &GigApplicationId) -> Error {
    Error::not_found(format!("gig application {id} not found"))
}

fn ensure_not_owner(gig: &Gig, applicant: &EmailAddress) -> Result<(), Error> {
    if gig.posted_by.as_ref() == Some(applicant) {
        return Err(
            Error::invalid_request("You cannot apply to your own gig").with_details(json!({
                "field": "applicantEmail",
                "code": "self_application",
            })),
        );
    }
    Ok(())
}

impl<A, G> GigApplicationService<A, G>
where
    A: GigApplicationRepository,
    G: GigRepository,
{
    async fn fetch_gig(&self, id: &GigId) -> Result<Gig, Error> {
        self.gigs
            .find_by_id(id)
            .await
            .map_err(map_gig_error)?
            .ok_or_else(|| gig_not_found(id))
    }

    async fn fetch(&self, id: &GigApplicationId) -> Result<GigApplication, Error> {
        self.applications
            .find_by_id(id)
            .await
            .map_err(map_application_error)?
            .ok_or_else(|| application_not_found(id))
    }
}

#[async_trait]
impl<A, G> GigApplicationCommand for GigApplicationService<A, G>
where
    A: GigApplicationRepository,
    G: GigRepository,
{
    async fn create(
        &self,
        submission: GigApplicationSubmission,
    ) -> Result<GigApplication, Error> {
        let applicant = require_email("applicantEmail", &submission.applicant_email)?;
        let gig = self.fetch_gig(&submission.gig_id).await?;
        ensure_not_owner(&gig, &applicant)?;

        let existing = self
            .applications
            .find_by_gig_and_applicant(&gig.id, &applicant)
            .await
            .map_err(map_application_error)?;
        if existing.is_some() {
            return Err(duplicate_application(
                &gig.id.to_string(),
                applicant.as_str(),
            ));
        }

        let draft = GigApplicationDraft {
            gig_id: gig.id,
            gig_title: gig.title,
            gig_owner_email: gig.posted_by,
            applicant_email: applicant,
            message: optional_text(submission.message.as_deref()),
        };
        let application = self
            .applications
            .insert(&draft)
            .await
            .map_err(map_application_error)?;
        info!(id = %application.id, gig = %application.gig_id, "gig application submitted");
        Ok(application)
    }

    async fn update_status(
        &self,
        id: &GigApplicationId,
        status: RequestStatus,
    ) -> Result<GigApplication, Error> {
        let current = self.fetch(id).await?;
        if self.policy.plan(current.status, status)? == StatusTransition::Unchanged {
            return Ok(current);
        }
        let updated = self
            .applications
            .update_status(id, current.status, status)
            .await
            .map_err(map_application_error)?;
        match updated {
            Some(application) => {
                info!(id = %application.id, from = %current.status, to = %application.status, "gig application status changed");
                Ok(application)
            }
            None => {
                self.fetch(id).await?;
                Err(Error::conflict(format!(
                    "gig application {id} changed status concurrently"
                )))
            }
        }
    }
}

#[async_trait]
impl<A, G> GigApplicationQuery for GigApplicationService<A, G>
where
    A: GigApplicationRepository,
    G: GigRepository,
{
    async fn list(
        &self,
        scope: GigApplicationScope,
    ) -> Result<RequestListing<GigApplication>, Error> {
        let listing = match scope {
            GigApplicationScope::ForUser(email) => RequestListing::Inbox {
                received: self
                    .applications
                    .list_received(&email)
                    .await
                    .map_err(map_application_error)?,
                sent: self
                    .applications
                    .list_sent(&email)
                    .await
                    .map_err(map_application_error)?,
            },
            GigApplicationScope::ForGig(gig_id) => RequestListing::All(
                self.applications
                    .list_for_gig(&gig_id)
                    .await
                    .map_err(map_application_error)?,
            ),
            GigApplicationScope::All => RequestListing::All(
                self.applications
                    .list_all()
                    .await
                    .map_err(map_application_error)?,
            ),
        };
        Ok(listing)
    }
}

#[cfg(test)]
#[path = "gig_application_service_tests.rs"]
mod tests;
