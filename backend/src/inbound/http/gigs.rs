//! Gig catalogue HTTP handlers.
//!
//! ```text
//! POST   /api/v1/gigs
//! GET    /api/v1/gigs
//! GET    /api/v1/gigs/{id}
//! DELETE /api/v1/gigs/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Gig, GigId, GigSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require_field, require_value};

/// Request payload for posting a gig.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGigRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    /// Engagement type; defaults to "One-time Project".
    #[serde(rename = "type")]
    pub gig_type: Option<String>,
    pub skills: Option<Vec<String>>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub duration: Option<String>,
    /// Defaults to "Remote".
    pub location: Option<String>,
    /// Owner email. Anonymous gigs emit no stats.
    pub posted_by: Option<String>,
}

/// Gig as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GigResponse {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(rename = "type")]
    pub gig_type: String,
    pub skills: Vec<String>,
    pub description: String,
    pub budget: f64,
    pub duration: String,
    pub location: String,
    pub posted_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Gig> for GigResponse {
    fn from(gig: Gig) -> Self {
        Self {
            id: gig.id.to_string(),
            title: gig.title,
            category: gig.category,
            gig_type: gig.gig_type,
            skills: gig.skills,
            description: gig.description,
            budget: gig.budget.amount(),
            duration: gig.duration,
            location: gig.location,
            posted_by: gig.posted_by.map(String::from),
            created_at: gig.created_at.to_rfc3339(),
            updated_at: gig.updated_at.to_rfc3339(),
        }
    }
}

/// Confirmation body for a deleted gig.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteGigResponse {
    #[schema(example = "Gig deleted")]
    pub message: String,
}

fn parse_submission(payload: CreateGigRequest) -> Result<GigSubmission, Error> {
    Ok(GigSubmission {
        title: require_field(payload.title, FieldName::new("title"))?,
        category: require_field(payload.category, FieldName::new("category"))?,
        gig_type: payload.gig_type,
        skills: payload.skills.unwrap_or_default(),
        description: require_field(payload.description, FieldName::new("description"))?,
        budget: require_value(payload.budget, FieldName::new("budget"))?,
        duration: require_field(payload.duration, FieldName::new("duration"))?,
        location: payload.location,
        posted_by: payload.posted_by,
    })
}

fn gig_id(raw: &str) -> Result<GigId, Error> {
    parse_id(raw, FieldName::new("id"), GigId::parse)
}

/// Post a new gig.
#[utoipa::path(
    post,
    path = "/api/v1/gigs",
    request_body = CreateGigRequest,
    responses(
        (status = 201, description = "Gig created", body = GigResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["gigs"],
    operation_id = "createGig"
)]
#[post("/gigs")]
pub async fn create_gig(
    state: web::Data<HttpState>,
    payload: web::Json<CreateGigRequest>,
) -> ApiResult<HttpResponse> {
    let submission = parse_submission(payload.into_inner())?;
    let gig = state.gigs.create(submission).await?;
    Ok(HttpResponse::Created().json(GigResponse::from(gig)))
}

/// List gigs, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/gigs",
    responses(
        (status = 200, description = "Gigs", body = [GigResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["gigs"],
    operation_id = "listGigs"
)]
#[get("/gigs")]
pub async fn list_gigs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<GigResponse>>> {
    let gigs = state.gigs_query.list().await?;
    Ok(web::Json(gigs.into_iter().map(GigResponse::from).collect()))
}

/// Fetch one gig.
#[utoipa::path(
    get,
    path = "/api/v1/gigs/{id}",
    params(("id" = String, Path, description = "Gig identifier")),
    responses(
        (status = 200, description = "Gig", body = GigResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Gig not found", body = ErrorSchema)
    ),
    tags = ["gigs"],
    operation_id = "getGig"
)]
#[get("/gigs/{id}")]
pub async fn get_gig(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GigResponse>> {
    let id = gig_id(&path.into_inner())?;
    let gig = state.gigs_query.get(&id).await?;
    Ok(web::Json(GigResponse::from(gig)))
}

/// Delete a gig and release its owner's posted counter.
#[utoipa::path(
    delete,
    path = "/api/v1/gigs/{id}",
    params(("id" = String, Path, description = "Gig identifier")),
    responses(
        (status = 200, description = "Gig deleted", body = DeleteGigResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Gig not found", body = ErrorSchema)
    ),
    tags = ["gigs"],
    operation_id = "deleteGig"
)]
#[delete("/gigs/{id}")]
pub async fn delete_gig(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteGigResponse>> {
    let id = gig_id(&path.into_inner())?;
    state.gigs.delete(&id).await?;
    Ok(web::Json(DeleteGigResponse {
        message: "Gig deleted".to_owned(),
    }))
}
