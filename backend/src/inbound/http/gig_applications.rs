//! Gig application handlers.
//!
//! ```text
//! POST  /api/v1/gig-applications
//! GET   /api/v1/gig-applications?email=&gigId=
//! PATCH /api/v1/gig-applications/{id}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::GigApplicationSubmission;
use crate::domain::{
    Error, GigApplication, GigApplicationId, GigApplicationScope, GigId,
    RequestListing,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::lifecycle::{EmailQuery, StatusUpdateRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require_field};

const GIG_ID: FieldName = FieldName::new("gigId");

/// Request payload for applying to a gig.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGigApplicationRequest {
    pub gig_id: Option<String>,
    pub applicant_email: Option<String>,
    pub message: Option<String>,
}

/// Gig application as returned to clients.
///
/// `gigTitle` and `gigOwnerEmail` are snapshots taken when the application
/// was made.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GigApplicationResponse {
    pub id: String,
    pub gig_id: String,
    pub gig_title: String,
    pub gig_owner_email: Option<String>,
    pub applicant_email: String,
    pub message: Option<String>,
    #[schema(value_type = crate::inbound::http::schemas::RequestStatusSchema)]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GigApplication> for GigApplicationResponse {
    fn from(application: GigApplication) -> Self {
        Self {
            id: application.id.to_string(),
            gig_id: application.gig_id.to_string(),
            gig_title: application.gig_title,
            gig_owner_email: application.gig_owner_email.map(String::from),
            applicant_email: application.applicant_email.into(),
            message: application.message,
            status: application.status.to_string(),
            created_at: application.created_at.to_rfc3339(),
            updated_at: application.updated_at.to_rfc3339(),
        }
    }
}

/// `received`/`sent` for one user, otherwise `all`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GigApplicationListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<Vec<GigApplicationResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent: Option<Vec<GigApplicationResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<GigApplicationResponse>>,
}

fn convert(applications: Vec<GigApplication>) -> Vec<GigApplicationResponse> {
    applications
        .into_iter()
        .map(GigApplicationResponse::from)
        .collect()
}

impl From<RequestListing<GigApplication>> for GigApplicationListResponse {
    fn from(listing: RequestListing<GigApplication>) -> Self {
        match listing {
            RequestListing::Inbox { received, sent } => Self {
                received: Some(convert(received)),
                sent: Some(convert(sent)),
                all: None,
            },
            RequestListing::All(all) => Self {
                received: None,
                sent: None,
                all: Some(convert(all)),
            },
        }
    }
}

/// Listing filters. `email` wins over `gigId` when both are present.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ApplicationQuery {
    /// Caller identity: split results into received and sent.
    pub email: Option<String>,
    /// Only applications to this gig.
    pub gig_id: Option<String>,
}

fn scope_for(query: ApplicationQuery) -> Result<GigApplicationScope, Error> {
    let identity = EmailQuery { email: query.email }.identity()?;
    if let Some(email) = identity {
        return Ok(GigApplicationScope::ForUser(email));
    }
    match query.gig_id.as_deref().filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => Ok(GigApplicationScope::ForGig(parse_id(raw, GIG_ID, GigId::parse)?)),
        None => Ok(GigApplicationScope::All),
    }
}

fn parse_submission(payload: CreateGigApplicationRequest) -> Result<GigApplicationSubmission, Error> {
    let gig_id = require_field(payload.gig_id, GIG_ID)?;
    Ok(GigApplicationSubmission {
        gig_id: parse_id(&gig_id, GIG_ID, GigId::parse)?,
        applicant_email: payload.applicant_email.unwrap_or_default(),
        message: payload.message,
    })
}

/// Apply to a gig.
#[utoipa::path(
    post,
    path = "/api/v1/gig-applications",
    request_body = CreateGigApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = GigApplicationResponse),
        (status = 400, description = "Invalid request or own gig", body = ErrorSchema),
        (status = 404, description = "Gig not found", body = ErrorSchema),
        (status = 409, description = "Already applied", body = ErrorSchema)
    ),
    tags = ["gig-applications"],
    operation_id = "createGigApplication"
)]
#[post("/gig-applications")]
pub async fn create_gig_application(
    state: web::Data<HttpState>,
    payload: web::Json<CreateGigApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let submission = parse_submission(payload.into_inner())?;
    let application = state.gig_applications.create(submission).await?;
    Ok(HttpResponse::Created().json(GigApplicationResponse::from(application)))
}

/// List gig applications by user, by gig, or all.
#[utoipa::path(
    get,
    path = "/api/v1/gig-applications",
    params(ApplicationQuery),
    responses(
        (status = 200, description = "Applications", body = GigApplicationListResponse),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["gig-applications"],
    operation_id = "listGigApplications"
)]
#[get("/gig-applications")]
pub async fn list_gig_applications(
    state: web::Data<HttpState>,
    query: web::Query<ApplicationQuery>,
) -> ApiResult<web::Json<GigApplicationListResponse>> {
    let scope = scope_for(query.into_inner())?;
    let listing = state.gig_applications_query.list(scope).await?;
    Ok(web::Json(listing.into()))
}

/// Accept or reject a gig application.
#[utoipa::path(
    patch,
    path = "/api/v1/gig-applications/{id}",
    params(("id" = String, Path, description = "Gig application identifier")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated application", body = GigApplicationResponse),
        (status = 400, description = "Invalid status or id", body = ErrorSchema),
        (status = 404, description = "Application not found", body = ErrorSchema),
        (status = 409, description = "Application already decided", body = ErrorSchema)
    ),
    tags = ["gig-applications"],
    operation_id = "updateGigApplicationStatus"
)]
#[patch("/gig-applications/{id}")]
pub async fn update_gig_application(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<GigApplicationResponse>> {
    let id = parse_id(&path.into_inner(), FieldName::new("id"), GigApplicationId::parse)?;
    let status = payload.into_inner().parse()?;
    let updated = state.gig_applications.update_status(&id, status).await?;
    Ok(web::Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::GigRepository;
    use crate::domain::{GigDraft, GigSubmission, TransitionPolicy};
    use crate::inbound::http::test_utils::{extractor_configs, memory_state};
    use crate::outbound::memory::MemoryStore;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    macro_rules! applications_app {
        ($state:expr) => {{
            let (json_cfg, query_cfg) = extractor_configs();
            test::init_service(
                App::new()
                    .app_data($state)
                    .app_data(json_cfg)
                    .app_data(query_cfg)
                    .service(create_gig_application)
                    .service(list_gig_applications)
                    .service(update_gig_application),
            )
            .await
        }};
    }

    async fn seed_gig(store: &MemoryStore, posted_by: &str) -> GigId {
        let draft = GigDraft::try_from(GigSubmission {
            title: "Logo design".to_owned(),
            category: "Design".to_owned(),
            description: "A new logo".to_owned(),
            budget: 150.0,
            duration: "2 weeks".to_owned(),
            posted_by: Some(posted_by.to_owned()),
            ..GigSubmission::default()
        })
        .expect("valid gig");
        store.insert(&draft).await.expect("gig stored").id
    }

    fn apply(gig_id: &GigId, applicant: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/gig-applications")
            .set_json(json!({
                "gigId": gig_id.to_string(),
                "applicantEmail": applicant,
                "message": "I can help"
            }))
    }

    #[rstest]
    #[actix_web::test]
    async fn create_snapshots_gig_details() {
        let (state, store) = memory_state(TransitionPolicy::Strict);
        let gig_id = seed_gig(&store, "owner@x.com").await;
        let app = applications_app!(state);

        let res = test::call_service(&app, apply(&gig_id, "Dev@X.com").to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: GigApplicationResponse = test::read_body_json(res).await;
        assert_eq!(body.gig_title, "Logo design");
        assert_eq!(body.gig_owner_email.as_deref(), Some("owner@x.com"));
        assert_eq!(body.applicant_email, "dev@x.com");
        assert_eq!(body.status, "pending");
    }

    #[rstest]
    #[case("owner@x.com", StatusCode::BAD_REQUEST)]
    #[case("dev@x.com", StatusCode::CONFLICT)]
    #[actix_web::test]
    async fn create_guards_self_and_repeat_applications(
        #[case] applicant: &str,
        #[case] expected: StatusCode,
    ) {
        let (state, store) = memory_state(TransitionPolicy::Strict);
        let gig_id = seed_gig(&store, "owner@x.com").await;
        let app = applications_app!(state);
        test::call_service(&app, apply(&gig_id, "dev@x.com").to_request()).await;

        let res = test::call_service(&app, apply(&gig_id, applicant).to_request()).await;
        assert_eq!(res.status(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_for_unknown_gig_is_not_found() {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let app = applications_app!(state);

        let req = apply(&GigId::random(), "dev@x.com").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_rejects_malformed_gig_id() {
        let (state, _) = memory_state(TransitionPolicy::Strict);
        let app = applications_app!(state);

        let req = test::TestRequest::post()
            .uri("/gig-applications")
            .set_json(json!({"gigId": "abc", "applicantEmail": "dev@x.com"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["details"]["field"], "gigId");
        assert_eq!(body["details"]["code"], "invalid_id");
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_modes() {
        let (state, store) = memory_state(TransitionPolicy::Strict);
        let first = seed_gig(&store, "owner@x.com").await;
        let second = seed_gig(&store, "other@x.com").await;
        let app = applications_app!(state);
        test::call_service(&app, apply(&first, "dev@x.com").to_request()).await;
        test::call_service(&app, apply(&second, "dev@x.com").to_request()).await;

        let owner_view: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/gig-applications?email=owner@x.com")
                .to_request(),
        )
        .await;
        assert_eq!(owner_view["received"].as_array().map(Vec::len), Some(1));
        assert_eq!(owner_view["sent"], json!([]));

        let by_gig: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/gig-applications?gigId={second}"))
                .to_request(),
        )
        .await;
        assert_eq!(by_gig["all"].as_array().map(Vec::len), Some(1));
        assert!(by_gig.get("received").is_none());

        let everything: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/gig-applications").to_request(),
        )
        .await;
        assert_eq!(everything["all"].as_array().map(Vec::len), Some(2));
    }

    #[rstest]
    #[actix_web::test]
    async fn status_updates_follow_the_lifecycle() {
        let (state, store) = memory_state(TransitionPolicy::Strict);
        let gig_id = seed_gig(&store, "owner@x.com").await;
        let app = applications_app!(state);
        let created: GigApplicationResponse =
            test::call_and_read_body_json(&app, apply(&gig_id, "dev@x.com").to_request()).await;
        let uri = format!("/gig-applications/{}", created.id);

        let rejected: GigApplicationResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::patch()
                .uri(&uri)
                .set_json(json!({"status": "rejected"}))
                .to_request(),
        )
        .await;
        assert_eq!(rejected.status, "rejected");

        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&uri)
                .set_json(json!({"status": "accepted"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }
}
