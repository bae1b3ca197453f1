//! Profile handlers.
//!
//! ```text
//! GET  /api/v1/profile/{email}
//! POST /api/v1/profile
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    EmailAddress, Error, ProfileStats, ProfileSubmission, UserProfile, normalize_skills,
    parse_skill_list,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

/// Skills as either a JSON array or one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

impl SkillsInput {
    fn into_skills(self) -> Vec<String> {
        match self {
            Self::List(items) => normalize_skills(items),
            Self::Csv(raw) => parse_skill_list(&raw),
        }
    }
}

/// Profile counters. Absent fields count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileStatsBody {
    pub gigs_posted: u32,
    pub gigs_completed: u32,
    pub skill_exchanges: u32,
    pub skill_exchanges_completed: u32,
}

impl From<ProfileStatsBody> for ProfileStats {
    fn from(body: ProfileStatsBody) -> Self {
        Self {
            gigs_posted: body.gigs_posted,
            gigs_completed: body.gigs_completed,
            skill_exchanges: body.skill_exchanges,
            skill_exchanges_completed: body.skill_exchanges_completed,
        }
    }
}

impl From<ProfileStats> for ProfileStatsBody {
    fn from(stats: ProfileStats) -> Self {
        Self {
            gigs_posted: stats.gigs_posted,
            gigs_completed: stats.gigs_completed,
            skill_exchanges: stats.skill_exchanges,
            skill_exchanges_completed: stats.skill_exchanges_completed,
        }
    }
}

/// Request payload for saving a profile.
///
/// Omitted `skills` or `stats` leave the stored values untouched.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfileRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<SkillsInput>,
    pub stats: Option<ProfileStatsBody>,
}

/// Profile as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub stats: ProfileStatsBody,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            email: profile.email.into(),
            name: profile.name,
            role: profile.role,
            location: profile.location,
            bio: profile.bio,
            skills: profile.skills,
            stats: profile.stats.into(),
            created_at: profile.created_at.to_rfc3339(),
            updated_at: profile.updated_at.to_rfc3339(),
        }
    }
}

fn parse_submission(payload: UpsertProfileRequest) -> Result<ProfileSubmission, Error> {
    Ok(ProfileSubmission {
        email: require_field(payload.email, FieldName::new("email"))?,
        name: require_field(payload.name, FieldName::new("name"))?,
        role: payload.role,
        location: payload.location,
        bio: payload.bio,
        skills: payload.skills.map(SkillsInput::into_skills),
        stats: payload.stats.map(ProfileStats::from),
    })
}

/// Fetch a profile by email.
#[utoipa::path(
    get,
    path = "/api/v1/profile/{email}",
    params(("email" = String, Path, description = "Profile email, matched case-insensitively")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfile"
)]
#[get("/profile/{email}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let email = EmailAddress::parse(path.into_inner())?;
    let profile = state.profiles_query.by_email(&email).await?;
    Ok(web::Json(profile.into()))
}

/// Create or update a profile.
#[utoipa::path(
    post,
    path = "/api/v1/profile",
    request_body = UpsertProfileRequest,
    responses(
        (status = 200, description = "Saved profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "upsertProfile"
)]
#[post("/profile")]
pub async fn upsert_profile(
    state: web::Data<HttpState>,
    payload: web::Json<UpsertProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let submission = parse_submission(payload.into_inner())?;
    let profile = state.profiles.upsert(submission).await?;
    Ok(web::Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransitionPolicy;
    use crate::inbound::http::test_utils::{extractor_configs, memory_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test::{self}};
    use rstest::rstest;
    use serde_json::{Value, json};

    macro_rules! profile_app {
        ($state:expr) => {{
            let (json_cfg, _) = extractor_configs();
            test::init_service(
                App::new()
                    .app_data($state)
                    .app_data(json_cfg)
                    .service(get_profile)
                    .service(upsert_profile),
            )
            .await
        }};
    }

    fn save(body: Value) -> test::TestRequest {
        test::TestRequest::post().uri("/profile").set_json(body)
    }

    #[rstest]
    #[case(json!(["React", " Node ", "React"]))]
    #[case(json!("React, Node,,React"))]
    fn skills_accept_array_or_csv(#[case] raw: Value) {
        let input: SkillsInput = serde_json::from_value(raw).expect("skills parse");
        assert_eq!(input.into_skills(), ["React", "Node"]);
    }

    #[rstest]
    fn partial_stats_default_to_zero() {
        let body: ProfileStatsBody =
            serde_json::from_value(json!({"gigsPosted": 3})).expect("stats parse");
        assert_eq!(ProfileStats::from(body).gigs_posted, 3);
        assert_eq!(body.skill_exchanges_completed, 0);
    }

    #[rstest]
    #[actix_web::test]
    async fn upsert_then_get_by_mixed_case_email() {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let app = profile_app!(state);

        let res = test::call_service(
            &app,
            save(json!({"email": "Ada@X.com", "name": "Ada", "skills": "Rust, Go"})).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let fetched: ProfileResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/profile/ADA@x.com").to_request(),
        )
        .await;
        assert_eq!(fetched.email, "ada@x.com");
        assert_eq!(fetched.skills, ["Rust", "Go"]);
        assert_eq!(fetched.stats, ProfileStatsBody::default());
    }

    #[rstest]
    #[actix_web::test]
    async fn upsert_without_stats_keeps_counters() {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let app = profile_app!(state);
        test::call_service(
            &app,
            save(json!({"email": "ada@x.com", "name": "Ada", "stats": {"gigsPosted": 2}}))
                .to_request(),
        )
        .await;

        let updated: ProfileResponse = test::call_and_read_body_json(
            &app,
            save(json!({"email": "ada@x.com", "name": "Ada L."})).to_request(),
        )
        .await;
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.stats.gigs_posted, 2);
    }

    #[rstest]
    #[case(json!({"name": "Ada"}), "email")]
    #[case(json!({"email": "ada@x.com"}), "name")]
    #[actix_web::test]
    async fn upsert_requires_email_and_name(#[case] body: Value, #[case] field: &str) {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let app = profile_app!(state);

        let res = test::call_service(&app, save(body).to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_profile_is_not_found() {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let app = profile_app!(state);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/profile/nobody@x.com").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
