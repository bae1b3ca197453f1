//! Dashboard handler.
//!
//! ```text
//! GET /api/v1/dashboard?email=
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{DashboardSnapshot, DashboardUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::lifecycle::EmailQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Headline counters for the dashboard user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUserStatsBody {
    pub gigs_posted: u32,
    pub gigs_completed: u32,
    pub skill_exchanges: u32,
}

/// The caller's name and counters; empty name and zeros without a profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardUserBody {
    pub email: String,
    pub name: String,
    pub stats: DashboardUserStatsBody,
}

impl From<DashboardUser> for DashboardUserBody {
    fn from(user: DashboardUser) -> Self {
        Self {
            email: user.email.into(),
            name: user.name,
            stats: DashboardUserStatsBody {
                gigs_posted: user.stats.gigs_posted,
                gigs_completed: user.stats.gigs_completed,
                skill_exchanges: user.stats.skill_exchanges,
            },
        }
    }
}

/// Marketplace totals plus the caller's counters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_gigs: u64,
    pub total_skill_exchanges: u64,
    pub total_profiles: u64,
    pub user: Option<DashboardUserBody>,
}

impl From<DashboardSnapshot> for DashboardResponse {
    fn from(snapshot: DashboardSnapshot) -> Self {
        Self {
            total_gigs: snapshot.total_gigs,
            total_skill_exchanges: snapshot.total_skill_exchanges,
            total_profiles: snapshot.total_profiles,
            user: snapshot.user.map(DashboardUserBody::from),
        }
    }
}

/// Aggregate counts for the landing dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(EmailQuery),
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardResponse),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<DashboardResponse>> {
    let email = query.identity()?;
    let snapshot = state.dashboard.snapshot(email).await?;
    Ok(web::Json(snapshot.into()))
}
