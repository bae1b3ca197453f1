//! PostgreSQL-backed `ExchangeRequestRepository`.
//!
//! Status changes are a single conditional `UPDATE ... WHERE status = $expected`
//! so concurrent decisions on the same request cannot both succeed.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ExchangeRequestRepository, ExchangeRequestRepositoryError};
use crate::domain::{
    EmailAddress, ExchangeRequest, ExchangeRequestDraft, ExchangeRequestId, RequestStatus,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ExchangeRequestRow, NewExchangeRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::exchange_requests;

/// Diesel implementation of the exchange request port.
#[derive(Clone)]
pub struct DieselExchangeRequestRepository {
    pool: DbPool,
}

impl DieselExchangeRequestRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExchangeRequestRepositoryError {
    map_basic_pool_error(error, |message| {
        ExchangeRequestRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> ExchangeRequestRepositoryError {
    map_basic_diesel_error(
        error,
        ExchangeRequestRepositoryError::query,
        ExchangeRequestRepositoryError::connection,
    )
}

fn stored_email(raw: String, id: Uuid) -> Result<EmailAddress, ExchangeRequestRepositoryError> {
    EmailAddress::new(raw).map_err(|_| {
        ExchangeRequestRepositoryError::query(format!("exchange request {id} has a blank email"))
    })
}

fn row_to_request(row: ExchangeRequestRow) -> Result<ExchangeRequest, ExchangeRequestRepositoryError> {
    let status = RequestStatus::from_str(&row.status).map_err(|_| {
        ExchangeRequestRepositoryError::query(format!(
            "exchange request {} has unknown status '{}'",
            row.id, row.status
        ))
    })?;
    Ok(ExchangeRequest {
        id: ExchangeRequestId::from_uuid(row.id),
        from_email: stored_email(row.from_email, row.id)?,
        to_email: stored_email(row.to_email, row.id)?,
        message: row.message,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_requests(
    rows: Vec<ExchangeRequestRow>,
) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
    rows.into_iter().map(row_to_request).collect()
}

#[async_trait]
impl ExchangeRequestRepository for DieselExchangeRequestRepository {
    async fn insert(
        &self,
        draft: &ExchangeRequestDraft,
    ) -> Result<ExchangeRequest, ExchangeRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewExchangeRequestRow {
            id: Uuid::new_v4(),
            from_email: draft.from_email.as_str(),
            to_email: draft.to_email.as_str(),
            message: &draft.message,
        };
        let stored: ExchangeRequestRow = diesel::insert_into(exchange_requests::table)
            .values(&row)
            .returning(ExchangeRequestRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_request(stored)
    }

    async fn find_by_id(
        &self,
        id: &ExchangeRequestId,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ExchangeRequestRow> = exchange_requests::table
            .filter(exchange_requests::id.eq(id.as_uuid()))
            .select(ExchangeRequestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_request).transpose()
    }

    async fn update_status(
        &self,
        id: &ExchangeRequestId,
        expected: RequestStatus,
        next: RequestStatus,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ExchangeRequestRow> = diesel::update(
            exchange_requests::table
                .filter(exchange_requests::id.eq(id.as_uuid()))
                .filter(exchange_requests::status.eq(expected.as_str())),
        )
        .set((
            exchange_requests::status.eq(next.as_str()),
            exchange_requests::updated_at.eq(Utc::now()),
        ))
        .returning(ExchangeRequestRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_request).transpose()
    }

    async fn list_received(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ExchangeRequestRow> = exchange_requests::table
            .filter(exchange_requests::to_email.eq(email.as_str()))
            .filter(exchange_requests::from_email.ne(email.as_str()))
            .order((
                exchange_requests::created_at.desc(),
                exchange_requests::id.desc(),
            ))
            .select(ExchangeRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_requests(rows)
    }

    async fn list_sent(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ExchangeRequestRow> = exchange_requests::table
            .filter(exchange_requests::from_email.eq(email.as_str()))
            .order((
                exchange_requests::created_at.desc(),
                exchange_requests::id.desc(),
            ))
            .select(ExchangeRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_requests(rows)
    }

    async fn list_all(&self) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ExchangeRequestRow> = exchange_requests::table
            .order((
                exchange_requests::created_at.desc(),
                exchange_requests::id.desc(),
            ))
            .select(ExchangeRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_requests(rows)
    }
}
