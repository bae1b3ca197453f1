//! HTTP inbound adapter exposing REST endpoints.

pub mod dashboard;
pub mod error;
pub mod exchange_requests;
pub mod gig_applications;
pub mod gigs;
pub mod health;
pub mod lifecycle;
pub mod profile;
pub mod schemas;
pub mod skill_exchange;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
