//! Exchange request handlers.
//!
//! ```text
//! POST  /api/v1/exchange-requests
//! GET   /api/v1/exchange-requests?email=
//! PATCH /api/v1/exchange-requests/{id}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ExchangeRequestSubmission;
use crate::domain::{ExchangeRequest, ExchangeRequestId, ExchangeRequestScope, RequestListing};
use crate::inbound::http::ApiResult;
use crate::inbound::http::lifecycle::{EmailQuery, StatusUpdateRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request payload for asking another user to trade skills.
///
/// Missing emails are reported by the domain as `missing_email`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExchangeRequestRequest {
    pub from_email: Option<String>,
    pub to_email: Option<String>,
    pub message: Option<String>,
}

/// Exchange request as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequestResponse {
    pub id: String,
    pub from_email: String,
    pub to_email: String,
    pub message: String,
    #[schema(value_type = crate::inbound::http::schemas::RequestStatusSchema)]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ExchangeRequest> for ExchangeRequestResponse {
    fn from(request: ExchangeRequest) -> Self {
        Self {
            id: request.id.to_string(),
            from_email: request.from_email.into(),
            to_email: request.to_email.into(),
            message: request.message,
            status: request.status.to_string(),
            created_at: request.created_at.to_rfc3339(),
            updated_at: request.updated_at.to_rfc3339(),
        }
    }
}

/// Inbox view for one user, or every request under `all` when no email was
/// given. `received` excludes requests a user sent to themselves.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRequestListResponse {
    pub received: Vec<ExchangeRequestResponse>,
    pub sent: Vec<ExchangeRequestResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<ExchangeRequestResponse>>,
}

fn convert(requests: Vec<ExchangeRequest>) -> Vec<ExchangeRequestResponse> {
    requests
        .into_iter()
        .map(ExchangeRequestResponse::from)
        .collect()
}

impl From<RequestListing<ExchangeRequest>> for ExchangeRequestListResponse {
    fn from(listing: RequestListing<ExchangeRequest>) -> Self {
        match listing {
            RequestListing::Inbox { received, sent } => Self {
                received: convert(received),
                sent: convert(sent),
                all: None,
            },
            RequestListing::All(all) => Self {
                received: Vec::new(),
                sent: Vec::new(),
                all: Some(convert(all)),
            },
        }
    }
}

/// Send an exchange request.
#[utoipa::path(
    post,
    path = "/api/v1/exchange-requests",
    request_body = CreateExchangeRequestRequest,
    responses(
        (status = 201, description = "Request created", body = ExchangeRequestResponse),
        (status = 400, description = "Missing sender or recipient", body = ErrorSchema)
    ),
    tags = ["exchange-requests"],
    operation_id = "createExchangeRequest"
)]
#[post("/exchange-requests")]
pub async fn create_exchange_request(
    state: web::Data<HttpState>,
    payload: web::Json<CreateExchangeRequestRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let request = state
        .exchange_requests
        .create(ExchangeRequestSubmission {
            from_email: payload.from_email.unwrap_or_default(),
            to_email: payload.to_email.unwrap_or_default(),
            message: payload.message,
        })
        .await?;
    Ok(HttpResponse::Created().json(ExchangeRequestResponse::from(request)))
}

/// List exchange requests for a user, or all of them.
#[utoipa::path(
    get,
    path = "/api/v1/exchange-requests",
    params(EmailQuery),
    responses(
        (status = 200, description = "Requests", body = ExchangeRequestListResponse),
        (status = 400, description = "Invalid email", body = ErrorSchema)
    ),
    tags = ["exchange-requests"],
    operation_id = "listExchangeRequests"
)]
#[get("/exchange-requests")]
pub async fn list_exchange_requests(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<ExchangeRequestListResponse>> {
    let scope = match query.identity()? {
        Some(email) => ExchangeRequestScope::ForUser(email),
        None => ExchangeRequestScope::All,
    };
    let listing = state.exchange_requests_query.list(scope).await?;
    Ok(web::Json(listing.into()))
}

/// Accept or reject an exchange request.
#[utoipa::path(
    patch,
    path = "/api/v1/exchange-requests/{id}",
    params(("id" = String, Path, description = "Exchange request identifier")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated request", body = ExchangeRequestResponse),
        (status = 400, description = "Invalid status or id", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema),
        (status = 409, description = "Request already decided", body = ErrorSchema)
    ),
    tags = ["exchange-requests"],
    operation_id = "updateExchangeRequestStatus"
)]
#[patch("/exchange-requests/{id}")]
pub async fn update_exchange_request(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<ExchangeRequestResponse>> {
    let id = parse_id(&path.into_inner(), FieldName::new("id"), ExchangeRequestId::parse)?;
    let status = payload.into_inner().parse()?;
    let updated = state.exchange_requests.update_status(&id, status).await?;
    Ok(web::Json(updated.into()))
}
