//! Internal Diesel row structs.
//!
//! These types stay inside the persistence layer. Repositories convert them
//! to domain records before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{exchange_requests, gig_applications, gigs, skill_exchanges, user_profiles};

// ---------------------------------------------------------------------------
// Gigs
// ---------------------------------------------------------------------------

/// Row read from the gigs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = gigs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GigRow {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub gig_type: String,
    pub skills: Vec<String>,
    pub description: String,
    pub budget: f64,
    pub duration: String,
    pub location: String,
    pub posted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable gig; timestamps come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gigs)]
pub(crate) struct NewGigRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub category: &'a str,
    pub gig_type: &'a str,
    pub skills: &'a [String],
    pub description: &'a str,
    pub budget: f64,
    pub duration: &'a str,
    pub location: &'a str,
    pub posted_by: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Skill exchanges
// ---------------------------------------------------------------------------

/// Row read from the skill_exchanges table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skill_exchanges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillExchangeRow {
    pub id: Uuid,
    pub name: String,
    pub owner_email: Option<String>,
    pub skill_offered: String,
    pub skill_wanted: String,
    pub location: String,
    pub match_score: i16,
    pub created_at: DateTime<Utc>,
}

/// Insertable skill-exchange entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skill_exchanges)]
pub(crate) struct NewSkillExchangeRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub owner_email: Option<&'a str>,
    pub skill_offered: &'a str,
    pub skill_wanted: &'a str,
    pub location: &'a str,
    pub match_score: i16,
}

// ---------------------------------------------------------------------------
// Exchange requests
// ---------------------------------------------------------------------------

/// Row read from the exchange_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exchange_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExchangeRequestRow {
    pub id: Uuid,
    pub from_email: String,
    pub to_email: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable exchange request; status defaults to `pending`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exchange_requests)]
pub(crate) struct NewExchangeRequestRow<'a> {
    pub id: Uuid,
    pub from_email: &'a str,
    pub to_email: &'a str,
    pub message: &'a str,
}

// ---------------------------------------------------------------------------
// Gig applications
// ---------------------------------------------------------------------------

/// Row read from the gig_applications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = gig_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GigApplicationRow {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub gig_title: String,
    pub gig_owner_email: Option<String>,
    pub applicant_email: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable gig application; status defaults to `pending`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gig_applications)]
pub(crate) struct NewGigApplicationRow<'a> {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub gig_title: &'a str,
    pub gig_owner_email: Option<&'a str>,
    pub applicant_email: &'a str,
    pub message: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// User profiles
// ---------------------------------------------------------------------------

/// Row read from the user_profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub gigs_posted: i32,
    pub gigs_completed: i32,
    pub skill_exchanges: i32,
    pub skill_exchanges_completed: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable profile with explicit counters.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profiles)]
pub(crate) struct NewUserProfileRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub role: Option<&'a str>,
    pub location: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub skills: &'a [String],
    pub gigs_posted: i32,
    pub gigs_completed: i32,
    pub skill_exchanges: i32,
    pub skill_exchanges_completed: i32,
}

/// Changeset for profile edits. `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_profiles)]
pub(crate) struct UserProfileUpdate<'a> {
    pub name: &'a str,
    pub role: Option<&'a str>,
    pub location: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub skills: Option<&'a [String]>,
    pub gigs_posted: Option<i32>,
    pub gigs_completed: Option<i32>,
    pub skill_exchanges: Option<i32>,
    pub skill_exchanges_completed: Option<i32>,
}
