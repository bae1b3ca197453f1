//! PostgreSQL-backed `GigApplicationRepository`.
//!
//! The `(gig_id, applicant_email)` unique constraint is the final word on
//! duplicates; a violation becomes `GigApplicationRepositoryError::Duplicate`.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{GigApplicationRepository, GigApplicationRepositoryError};
use crate::domain::{
    EmailAddress, GigApplication, GigApplicationDraft, GigApplicationId, GigId, RequestStatus,
};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{GigApplicationRow, NewGigApplicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::gig_applications;

/// Diesel implementation of the gig application port.
#[derive(Clone)]
pub struct DieselGigApplicationRepository {
    pool: DbPool,
}

impl DieselGigApplicationRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GigApplicationRepositoryError {
    map_basic_pool_error(error, |message| {
        GigApplicationRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> GigApplicationRepositoryError {
    map_basic_diesel_error(
        error,
        GigApplicationRepositoryError::query,
        GigApplicationRepositoryError::connection,
    )
}

fn map_insert_error(
    error: diesel::result::Error,
    draft: &GigApplicationDraft,
) -> GigApplicationRepositoryError {
    if is_unique_violation(&error) {
        return GigApplicationRepositoryError::duplicate(
            draft.gig_id.to_string(),
            draft.applicant_email.as_str(),
        );
    }
    map_diesel_error(error)
}

fn row_to_application(
    row: GigApplicationRow,
) -> Result<GigApplication, GigApplicationRepositoryError> {
    let status = RequestStatus::from_str(&row.status).map_err(|_| {
        GigApplicationRepositoryError::query(format!(
            "gig application {} has unknown status '{}'",
            row.id, row.status
        ))
    })?;
    let applicant_email = EmailAddress::new(row.applicant_email).map_err(|_| {
        GigApplicationRepositoryError::query(format!(
            "gig application {} has a blank applicant",
            row.id
        ))
    })?;
    Ok(GigApplication {
        id: GigApplicationId::from_uuid(row.id),
        gig_id: GigId::from_uuid(row.gig_id),
        gig_title: row.gig_title,
        gig_owner_email: row
            .gig_owner_email
            .and_then(|raw| EmailAddress::new(raw).ok()),
        applicant_email,
        message: row.message,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_applications(
    rows: Vec<GigApplicationRow>,
) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
    rows.into_iter().map(row_to_application).collect()
}

#[async_trait]
impl GigApplicationRepository for DieselGigApplicationRepository {
    async fn insert(
        &self,
        draft: &GigApplicationDraft,
    ) -> Result<GigApplication, GigApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGigApplicationRow {
            id: Uuid::new_v4(),
            gig_id: *draft.gig_id.as_uuid(),
            gig_title: &draft.gig_title,
            gig_owner_email: draft.gig_owner_email.as_ref().map(EmailAddress::as_str),
            applicant_email: draft.applicant_email.as_str(),
            message: draft.message.as_deref(),
        };
        let stored: GigApplicationRow = diesel::insert_into(gig_applications::table)
            .values(&row)
            .returning(GigApplicationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, draft))?;
        row_to_application(stored)
    }

    async fn find_by_id(
        &self,
        id: &GigApplicationId,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GigApplicationRow> = gig_applications::table
            .filter(gig_applications::id.eq(id.as_uuid()))
            .select(GigApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_application).transpose()
    }

    async fn find_by_gig_and_applicant(
        &self,
        gig_id: &GigId,
        applicant: &EmailAddress,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GigApplicationRow> = gig_applications::table
            .filter(gig_applications::gig_id.eq(gig_id.as_uuid()))
            .filter(gig_applications::applicant_email.eq(applicant.as_str()))
            .select(GigApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_application).transpose()
    }

    async fn update_status(
        &self,
        id: &GigApplicationId,
        expected: RequestStatus,
        next: RequestStatus,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GigApplicationRow> = diesel::update(
            gig_applications::table
                .filter(gig_applications::id.eq(id.as_uuid()))
                .filter(gig_applications::status.eq(expected.as_str())),
        )
        .set((
            gig_applications::status.eq(next.as_str()),
            gig_applications::updated_at.eq(Utc::now()),
        ))
        .returning(GigApplicationRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_application).transpose()
    }

    async fn list_received(
        &self,
        owner: &EmailAddress,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GigApplicationRow> = gig_applications::table
            .filter(gig_applications::gig_owner_email.eq(owner.as_str()))
            .order((
                gig_applications::created_at.desc(),
                gig_applications::id.desc(),
            ))
            .select(GigApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_applications(rows)
    }

    async fn list_sent(
        &self,
        applicant: &EmailAddress,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GigApplicationRow> = gig_applications::table
            .filter(gig_applications::applicant_email.eq(applicant.as_str()))
            .order((
                gig_applications::created_at.desc(),
                gig_applications::id.desc(),
            ))
            .select(GigApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_applications(rows)
    }

    async fn list_for_gig(
        &self,
        gig_id: &GigId,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GigApplicationRow> = gig_applications::table
            .filter(gig_applications::gig_id.eq(gig_id.as_uuid()))
            .order((
                gig_applications::created_at.desc(),
                gig_applications::id.desc(),
            ))
            .select(GigApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_applications(rows)
    }

    async fn list_all(&self) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GigApplicationRow> = gig_applications::table
            .order((
                gig_applications::created_at.desc(),
                gig_applications::id.desc(),
            ))
            .select(GigApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_applications(rows)
    }
}
