//! PostgreSQL-backed `SkillExchangeRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SkillExchangeRepository, SkillExchangeRepositoryError};
use crate::domain::{EmailAddress, MatchScore, SkillExchange, SkillExchangeDraft, SkillExchangeId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSkillExchangeRow, SkillExchangeRow};
use super::pool::{DbPool, PoolError};
use super::schema::skill_exchanges;

/// Diesel implementation of the skill-exchange port.
#[derive(Clone)]
pub struct DieselSkillExchangeRepository {
    pool: DbPool,
}

impl DieselSkillExchangeRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SkillExchangeRepositoryError {
    map_basic_pool_error(error, |message| {
        SkillExchangeRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> SkillExchangeRepositoryError {
    map_basic_diesel_error(
        error,
        SkillExchangeRepositoryError::query,
        SkillExchangeRepositoryError::connection,
    )
}

fn row_to_entry(row: SkillExchangeRow) -> Result<SkillExchange, SkillExchangeRepositoryError> {
    let match_score = MatchScore::new(i64::from(row.match_score)).map_err(|_| {
        SkillExchangeRepositoryError::query(format!(
            "skill exchange {} has an out-of-range match score",
            row.id
        ))
    })?;
    Ok(SkillExchange {
        id: SkillExchangeId::from_uuid(row.id),
        name: row.name,
        owner_email: row.owner_email.and_then(|raw| EmailAddress::new(raw).ok()),
        skill_offered: row.skill_offered,
        skill_wanted: row.skill_wanted,
        location: row.location,
        match_score,
        created_at: row.created_at,
    })
}

#[async_trait]
impl SkillExchangeRepository for DieselSkillExchangeRepository {
    async fn insert(
        &self,
        draft: &SkillExchangeDraft,
    ) -> Result<SkillExchange, SkillExchangeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSkillExchangeRow {
            id: Uuid::new_v4(),
            name: &draft.name,
            owner_email: draft.owner_email.as_ref().map(EmailAddress::as_str),
            skill_offered: &draft.skill_offered,
            skill_wanted: &draft.skill_wanted,
            location: &draft.location,
            match_score: i16::from(draft.match_score.value()),
        };
        let stored: SkillExchangeRow = diesel::insert_into(skill_exchanges::table)
            .values(&row)
            .returning(SkillExchangeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_entry(stored)
    }

    async fn list(&self) -> Result<Vec<SkillExchange>, SkillExchangeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SkillExchangeRow> = skill_exchanges::table
            .order((
                skill_exchanges::created_at.desc(),
                skill_exchanges::id.desc(),
            ))
            .select(SkillExchangeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_entry).collect()
    }

    async fn count(&self) -> Result<u64, SkillExchangeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = skill_exchanges::table
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

    fn row(match_score: i16) -> SkillExchangeRow {
        SkillExchangeRow {
            id: Uuid::new_v4(),
            name: "Ada".to_owned(),
            owner_email: Some("ada@x.com".to_owned()),
            skill_offered: "Rust".to_owned(),
            skill_wanted: "Design".to_owned(),
            location: "Remote".to_owned(),
            match_score,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_converts_score() {
        let entry = row_to_entry(row(91)).expect("valid row");
        assert_eq!(entry.match_score.value(), 91);
        assert!(entry.owner_email.is_some());
    }

    #[rstest]
    #[case(-1)]
    #[case(101)]
    fn out_of_range_score_is_a_query_error(#[case] score: i16) {
        let err = row_to_entry(row(score)).expect_err("invalid score");
        assert!(matches!(err, SkillExchangeRepositoryError::Query { .. }));
    }
}
