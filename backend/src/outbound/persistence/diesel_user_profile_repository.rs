//! PostgreSQL-backed `UserProfileRepository`.
//!
//! Counter adjustments are one `INSERT ... ON CONFLICT (email) DO UPDATE`
//! statement, so concurrent adjustments never lose an increment and a missing
//! profile is created on the fly. Counters clamp at zero via `GREATEST`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{
    EmailAddress, ProfileStats, ProfileUpsert, StatAdjustment, StatField, UserProfile,
    UserProfileId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserProfileRow, UserProfileRow, UserProfileUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::user_profiles;

diesel::define_sql_function! {
    /// PostgreSQL `GREATEST` over two integers.
    fn greatest(a: Integer, b: Integer) -> Integer;
}

/// Diesel implementation of the profile port.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserProfileRepositoryError {
    map_basic_pool_error(error, |message| {
        UserProfileRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_basic_diesel_error(
        error,
        UserProfileRepositoryError::query,
        UserProfileRepositoryError::connection,
    )
}

fn counter_to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn counter_from_db(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

fn row_to_profile(row: UserProfileRow) -> Result<UserProfile, UserProfileRepositoryError> {
    let email = EmailAddress::new(row.email).map_err(|_| {
        UserProfileRepositoryError::query(format!("profile {} has a blank email", row.id))
    })?;
    Ok(UserProfile {
        id: UserProfileId::from_uuid(row.id),
        email,
        name: row.name,
        role: row.role,
        location: row.location,
        bio: row.bio,
        skills: row.skills,
        stats: ProfileStats {
            gigs_posted: counter_from_db(row.gigs_posted),
            gigs_completed: counter_from_db(row.gigs_completed),
            skill_exchanges: counter_from_db(row.skill_exchanges),
            skill_exchanges_completed: counter_from_db(row.skill_exchanges_completed),
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn new_row<'a>(
    email: &'a EmailAddress,
    name: &'a str,
    skills: &'a [String],
    stats: ProfileStats,
) -> NewUserProfileRow<'a> {
    NewUserProfileRow {
        id: Uuid::new_v4(),
        email: email.as_str(),
        name,
        role: None,
        location: None,
        bio: None,
        skills,
        gigs_posted: counter_to_db(stats.gigs_posted),
        gigs_completed: counter_to_db(stats.gigs_completed),
        skill_exchanges: counter_to_db(stats.skill_exchanges),
        skill_exchanges_completed: counter_to_db(stats.skill_exchanges_completed),
    }
}

fn profile_update(upsert: &ProfileUpsert) -> UserProfileUpdate<'_> {
    UserProfileUpdate {
        name: &upsert.name,
        role: upsert.role.as_deref(),
        location: upsert.location.as_deref(),
        bio: upsert.bio.as_deref(),
        skills: upsert.skills.as_deref(),
        gigs_posted: upsert.stats.map(|s| counter_to_db(s.gigs_posted)),
        gigs_completed: upsert.stats.map(|s| counter_to_db(s.gigs_completed)),
        skill_exchanges: upsert.stats.map(|s| counter_to_db(s.skill_exchanges)),
        skill_exchanges_completed: upsert
            .stats
            .map(|s| counter_to_db(s.skill_exchanges_completed)),
    }
}

macro_rules! clamp_add {
    ($column:expr, $delta:expr) => {
        (
            $column.eq(greatest($column + $delta, 0)),
            user_profiles::updated_at.eq(Utc::now()),
        )
    };
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserProfileRow> = user_profiles::table
            .filter(user_profiles::email.eq(email.as_str()))
            .select(UserProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn upsert(
        &self,
        upsert: &ProfileUpsert,
    ) -> Result<UserProfile, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let skills = upsert.skills.as_deref().unwrap_or_default();
        let mut fresh = new_row(
            &upsert.email,
            &upsert.name,
            skills,
            upsert.stats.unwrap_or_default(),
        );
        fresh.role = upsert.role.as_deref();
        fresh.location = upsert.location.as_deref();
        fresh.bio = upsert.bio.as_deref();

        let inserted: Option<UserProfileRow> = diesel::insert_into(user_profiles::table)
            .values(&fresh)
            .on_conflict(user_profiles::email)
            .do_nothing()
            .returning(UserProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        if let Some(row) = inserted {
            return row_to_profile(row);
        }

        let updated: UserProfileRow = diesel::update(
            user_profiles::table.filter(user_profiles::email.eq(upsert.email.as_str())),
        )
        .set((
            &profile_update(upsert),
            user_profiles::updated_at.eq(Utc::now()),
        ))
        .returning(UserProfileRow::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        row_to_profile(updated)
    }

    async fn adjust_stat(
        &self,
        adjustment: &StatAdjustment,
    ) -> Result<(), UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut initial = ProfileStats::default();
        initial.apply(adjustment.field, adjustment.delta);
        let row = new_row(&adjustment.email, "", &[], initial);
        let delta = adjustment.delta;

        let statement = diesel::insert_into(user_profiles::table)
            .values(&row)
            .on_conflict(user_profiles::email)
            .do_update();
        let result = match adjustment.field {
            StatField::GigsPosted => {
                statement
                    .set(clamp_add!(user_profiles::gigs_posted, delta))
                    .execute(&mut conn)
                    .await
            }
            StatField::GigsCompleted => {
                statement
                    .set(clamp_add!(user_profiles::gigs_completed, delta))
                    .execute(&mut conn)
                    .await
            }
            StatField::SkillExchanges => {
                statement
                    .set(clamp_add!(user_profiles::skill_exchanges, delta))
                    .execute(&mut conn)
                    .await
            }
            StatField::SkillExchangesCompleted => {
                statement
                    .set(clamp_add!(user_profiles::skill_exchanges_completed, delta))
                    .execute(&mut conn)
                    .await
            }
        };
        result.map(|_| ()).map_err(map_diesel_error)
    }

    async fn count(&self) -> Result<u64, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = user_profiles::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}
