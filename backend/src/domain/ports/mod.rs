//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are called by inbound adapters.
//! Driven ports (`*Repository`, [`StatsOutbox`]) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod dashboard_query;
mod exchange_request_command;
mod exchange_request_query;
mod exchange_request_repository;
mod gig_application_command;
mod gig_application_query;
mod gig_application_repository;
mod gig_command;
mod gig_query;
mod gig_repository;
mod profile_command;
mod profile_query;
mod skill_exchange_command;
mod skill_exchange_query;
mod skill_exchange_repository;
mod stats_command;
mod stats_outbox;
mod user_profile_repository;

#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, DashboardSnapshot, DashboardUser, DashboardUserStats};
#[cfg(test)]
pub use exchange_request_command::MockExchangeRequestCommand;
pub use exchange_request_command::{ExchangeRequestCommand, ExchangeRequestSubmission};
#[cfg(test)]
pub use exchange_request_query::MockExchangeRequestQuery;
pub use exchange_request_query::ExchangeRequestQuery;
#[cfg(test)]
pub use exchange_request_repository::MockExchangeRequestRepository;
pub use exchange_request_repository::{ExchangeRequestRepository, ExchangeRequestRepositoryError};
#[cfg(test)]
pub use gig_application_command::MockGigApplicationCommand;
pub use gig_application_command::{GigApplicationCommand, GigApplicationSubmission};
#[cfg(test)]
pub use gig_application_query::MockGigApplicationQuery;
pub use gig_application_query::GigApplicationQuery;
#[cfg(test)]
pub use gig_application_repository::MockGigApplicationRepository;
pub use gig_application_repository::{GigApplicationRepository, GigApplicationRepositoryError};
#[cfg(test)]
pub use gig_command::MockGigCommand;
pub use gig_command::GigCommand;
#[cfg(test)]
pub use gig_query::MockGigQuery;
pub use gig_query::GigQuery;
#[cfg(test)]
pub use gig_repository::MockGigRepository;
pub use gig_repository::{GigRepository, GigRepositoryError};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use skill_exchange_command::MockSkillExchangeCommand;
pub use skill_exchange_command::SkillExchangeCommand;
#[cfg(test)]
pub use skill_exchange_query::MockSkillExchangeQuery;
pub use skill_exchange_query::SkillExchangeQuery;
#[cfg(test)]
pub use skill_exchange_repository::MockSkillExchangeRepository;
pub use skill_exchange_repository::{SkillExchangeRepository, SkillExchangeRepositoryError};
#[cfg(test)]
pub use stats_command::MockStatsCommand;
pub use stats_command::StatsCommand;
#[cfg(test)]
pub use stats_outbox::MockStatsOutbox;
pub use stats_outbox::{StatsOutbox, StatsOutboxError};
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{UserProfileRepository, UserProfileRepositoryError};
