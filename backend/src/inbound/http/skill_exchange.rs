//! Skill-exchange entry handlers.
//!
//! ```text
//! POST /api/v1/skill-exchange
//! GET  /api/v1/skill-exchange
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, SkillExchange, SkillExchangeSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

/// Request payload describing a trade a user wants.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillExchangeRequest {
    pub name: Option<String>,
    /// Owner email; entries without one are anonymous.
    pub email: Option<String>,
    pub skill_offered: Option<String>,
    pub skill_wanted: Option<String>,
    pub location: Option<String>,
    /// 0 to 100, defaults to 80.
    pub match_score: Option<i64>,
}

/// Skill-exchange entry as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillExchangeResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub skill_offered: String,
    pub skill_wanted: String,
    pub location: String,
    #[schema(minimum = 0, maximum = 100, example = 80)]
    pub match_score: u8,
    pub created_at: String,
}

impl From<SkillExchange> for SkillExchangeResponse {
    fn from(entry: SkillExchange) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name,
            email: entry.owner_email.map(String::from),
            skill_offered: entry.skill_offered,
            skill_wanted: entry.skill_wanted,
            location: entry.location,
            match_score: entry.match_score.value(),
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

fn parse_submission(payload: CreateSkillExchangeRequest) -> Result<SkillExchangeSubmission, Error> {
    Ok(SkillExchangeSubmission {
        name: require_field(payload.name, FieldName::new("name"))?,
        email: payload.email,
        skill_offered: require_field(payload.skill_offered, FieldName::new("skillOffered"))?,
        skill_wanted: require_field(payload.skill_wanted, FieldName::new("skillWanted"))?,
        location: payload.location,
        match_score: payload.match_score,
    })
}

/// List a new skill-exchange entry.
#[utoipa::path(
    post,
    path = "/api/v1/skill-exchange",
    request_body = CreateSkillExchangeRequest,
    responses(
        (status = 201, description = "Entry created", body = SkillExchangeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["skill-exchange"],
    operation_id = "createSkillExchange"
)]
#[post("/skill-exchange")]
pub async fn create_skill_exchange(
    state: web::Data<HttpState>,
    payload: web::Json<CreateSkillExchangeRequest>,
) -> ApiResult<HttpResponse> {
    let submission = parse_submission(payload.into_inner())?;
    let entry = state.skill_exchanges.create(submission).await?;
    Ok(HttpResponse::Created().json(SkillExchangeResponse::from(entry)))
}

/// List skill-exchange entries, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/skill-exchange",
    responses(
        (status = 200, description = "Entries", body = [SkillExchangeResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["skill-exchange"],
    operation_id = "listSkillExchanges"
)]
#[get("/skill-exchange")]
pub async fn list_skill_exchanges(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SkillExchangeResponse>>> {
    let entries = state.skill_exchanges_query.list().await?;
    Ok(web::Json(
        entries.into_iter().map(SkillExchangeResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockSkillExchangeQuery;
    use crate::domain::TransitionPolicy;
    use crate::inbound::http::test_utils::{extractor_configs, memory_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[rstest]
    #[actix_web::test]
    async fn create_defaults_score_and_location() {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let (json_cfg, _) = extractor_configs();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(json_cfg)
                .service(create_skill_exchange),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/skill-exchange")
            .set_json(json!({"name": "Ada", "skillOffered": "Rust", "skillWanted": "Spanish"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["matchScore"], 80);
        assert_eq!(body["location"], "Remote");
        assert!(body["email"].is_null());
    }

    #[rstest]
    #[case(json!({"name": "Ada", "skillOffered": "Rust", "skillWanted": "Go", "matchScore": 101}))]
    #[case(json!({"name": "Ada", "skillWanted": "Go"}))]
    #[actix_web::test]
    async fn create_rejects_invalid_payloads(#[case] payload: Value) {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let (json_cfg, _) = extractor_configs();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(json_cfg)
                .service(create_skill_exchange),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/skill-exchange")
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn list_surfaces_store_outage_as_503() {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let mut query = MockSkillExchangeQuery::new();
        query
            .expect_list()
            .returning(|| Err(Error::service_unavailable("connection refused")));
        let mut inner = state.get_ref().clone();
        inner.skill_exchanges_query = Arc::new(query);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(inner))
                .service(list_skill_exchanges),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/skill-exchange").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Service temporarily unavailable");
    }
}
