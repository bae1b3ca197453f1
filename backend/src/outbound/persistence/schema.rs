//! Diesel table definitions for the marketplace schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Posted gigs.
    gigs (id) {
        id -> Uuid,
        title -> Text,
        category -> Text,
        gig_type -> Text,
        skills -> Array<Text>,
        description -> Text,
        /// Non-negative; enforced by a check constraint.
        budget -> Float8,
        duration -> Text,
        location -> Text,
        /// Lower-cased owner email; null for anonymous gigs.
        posted_by -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skill-exchange listing entries.
    skill_exchanges (id) {
        id -> Uuid,
        name -> Text,
        owner_email -> Nullable<Text>,
        skill_offered -> Text,
        skill_wanted -> Text,
        location -> Text,
        /// Between 0 and 100.
        match_score -> Int2,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Person-to-person exchange requests.
    exchange_requests (id) {
        id -> Uuid,
        from_email -> Text,
        to_email -> Text,
        message -> Text,
        /// One of `pending`, `accepted`, `rejected`.
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applications to gigs. `(gig_id, applicant_email)` is unique.
    gig_applications (id) {
        id -> Uuid,
        gig_id -> Uuid,
        gig_title -> Text,
        gig_owner_email -> Nullable<Text>,
        applicant_email -> Text,
        message -> Nullable<Text>,
        /// One of `pending`, `accepted`, `rejected`.
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Profiles keyed by unique email, with denormalised counters.
    user_profiles (id) {
        id -> Uuid,
        email -> Text,
        name -> Text,
        role -> Nullable<Text>,
        location -> Nullable<Text>,
        bio -> Nullable<Text>,
        skills -> Array<Text>,
        gigs_posted -> Int4,
        gigs_completed -> Int4,
        skill_exchanges -> Int4,
        skill_exchanges_completed -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    gigs,
    skill_exchanges,
    exchange_requests,
    gig_applications,
    user_profiles,
);
