//! PostgreSQL-backed `GigRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{GigRepository, GigRepositoryError};
use crate::domain::{Budget, EmailAddress, Gig, GigDraft, GigId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{GigRow, NewGigRow};
use super::pool::{DbPool, PoolError};
use super::schema::gigs;

/// Diesel implementation of the gig port.
#[derive(Clone)]
pub struct DieselGigRepository {
    pool: DbPool,
}

impl DieselGigRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GigRepositoryError {
    map_basic_pool_error(error, |message| GigRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> GigRepositoryError {
    map_basic_diesel_error(
        error,
        |message| GigRepositoryError::query(message),
        |message| GigRepositoryError::connection(message),
    )
}

fn row_to_gig(row: GigRow) -> Result<Gig, GigRepositoryError> {
    let budget = Budget::new(row.budget)
        .map_err(|_| GigRepositoryError::query(format!("gig {} has an invalid budget", row.id)))?;
    Ok(Gig {
        id: GigId::from_uuid(row.id),
        title: row.title,
        category: row.category,
        gig_type: row.gig_type,
        skills: row.skills,
        description: row.description,
        budget,
        duration: row.duration,
        location: row.location,
        // Blank owners cannot be written; treat any that appear as anonymous.
        posted_by: row.posted_by.and_then(|raw| EmailAddress::new(raw).ok()),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl GigRepository for DieselGigRepository {
    async fn insert(&self, draft: &GigDraft) -> Result<Gig, GigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGigRow {
            id: Uuid::new_v4(),
            title: &draft.title,
            category: &draft.category,
            gig_type: &draft.gig_type,
            skills: &draft.skills,
            description: &draft.description,
            budget: draft.budget.amount(),
            duration: &draft.duration,
            location: &draft.location,
            posted_by: draft.posted_by.as_ref().map(EmailAddress::as_str),
        };
        let stored: GigRow = diesel::insert_into(gigs::table)
            .values(&row)
            .returning(GigRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_gig(stored)
    }

    async fn list(&self) -> Result<Vec<Gig>, GigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GigRow> = gigs::table
            .order((gigs::created_at.desc(), gigs::id.desc()))
            .select(GigRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_gig).collect()
    }

    async fn find_by_id(&self, id: &GigId) -> Result<Option<Gig>, GigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GigRow> = gigs::table
            .filter(gigs::id.eq(id.as_uuid()))
            .select(GigRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_gig).transpose()
    }

    async fn delete(&self, id: &GigId) -> Result<Option<Gig>, GigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GigRow> = diesel::delete(gigs::table.filter(gigs::id.eq(id.as_uuid())))
            .returning(GigRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_gig).transpose()
    }

    async fn count(&self) -> Result<u64, GigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = gigs::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn row(budget: f64, posted_by: Option<&str>) -> GigRow {
        let now = Utc::now();
        GigRow {
            id: Uuid::new_v4(),
            title: "Logo".to_owned(),
            category: "Design".to_owned(),
            gig_type: "One-time Project".to_owned(),
            skills: vec!["Figma".to_owned()],
            description: "Design a logo".to_owned(),
            budget,
            duration: "3 days".to_owned(),
            location: "Remote".to_owned(),
            posted_by: posted_by.map(str::to_owned),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn row_converts_owner_and_budget() {
        let gig = row_to_gig(row(120.5, Some("u1@x.com"))).expect("valid row");
        assert_eq!(gig.budget.amount(), 120.5);
        assert_eq!(gig.posted_by.map(String::from).as_deref(), Some("u1@x.com"));
    }

    #[rstest]
    fn negative_budget_is_a_query_error() {
        let err = row_to_gig(row(-1.0, None)).expect_err("invalid budget");
        assert!(matches!(err, GigRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, GigRepositoryError::Connection { .. }));
    }
}
