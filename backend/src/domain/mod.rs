//! Marketplace domain: entities, lifecycle services and ports.
//!
//! Purpose: define the strongly typed records the HTTP and persistence layers
//! exchange, the services that enforce their invariants, and the port traits
//! adapters implement. Nothing here depends on a framework or a driver.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Gig, SkillExchange, ExchangeRequest, GigApplication, UserProfile: stored
//!   records and the submissions that create them.
//! - RequestStatus and TransitionPolicy: the pending/accepted/rejected state
//!   machine shared by requests and applications.
//! - StatsEvent: counter changes carried to the stats synchronizer.

pub mod error;
pub mod ports;

mod dashboard_service;
mod email;
mod exchange_request;
mod exchange_request_service;
mod gig;
mod gig_application;
mod gig_application_service;
mod gig_service;
mod ids;
mod listing;
mod profile_service;
mod request_status;
mod skill_exchange;
mod skill_exchange_service;
mod stats;
mod stats_synchronizer;
mod trace_id;
mod user_profile;
mod validation;

pub use self::dashboard_service::DashboardService;
pub use self::email::{EmailAddress, EmptyEmailError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exchange_request::{ExchangeRequest, ExchangeRequestDraft};
pub use self::exchange_request_service::ExchangeRequestService;
pub use self::gig::{Budget, DEFAULT_GIG_TYPE, DEFAULT_LOCATION, Gig, GigDraft, GigSubmission};
pub use self::gig_application::{GigApplication, GigApplicationDraft};
pub use self::gig_application_service::GigApplicationService;
pub use self::gig_service::GigService;
pub use self::ids::{ExchangeRequestId, GigApplicationId, GigId, SkillExchangeId, UserProfileId};
pub use self::listing::{ExchangeRequestScope, GigApplicationScope, RequestListing};
pub use self::profile_service::ProfileService;
pub use self::request_status::{RequestStatus, StatusTransition, TransitionPolicy};
pub use self::skill_exchange::{
    MatchScore, SkillExchange, SkillExchangeDraft, SkillExchangeSubmission,
};
pub use self::skill_exchange_service::SkillExchangeService;
pub use self::stats::{StatAdjustment, StatsEvent};
pub use self::stats_synchronizer::StatsSynchronizer;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_profile::{
    ProfileStats, ProfileSubmission, ProfileUpsert, StatField, UserProfile, normalize_skills,
    parse_skill_list,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use skillx::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Gig not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
