//! Driving port for dashboard totals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, Error};

/// Counters shown on a user's dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUserStats {
    /// Gigs currently posted.
    pub gigs_posted: u32,
    /// Gigs completed.
    pub gigs_completed: u32,
    /// Skill exchanges listed or requested.
    pub skill_exchanges: u32,
}

/// The caller's slice of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUser {
    /// Caller identity.
    pub email: EmailAddress,
    /// Profile name; empty when no profile exists.
    pub name: String,
    /// Caller counters; zero when no profile exists.
    pub stats: DashboardUserStats,
}

/// Marketplace totals plus the caller's own counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Stored gigs.
    pub total_gigs: u64,
    /// Stored skill-exchange entries.
    pub total_skill_exchanges: u64,
    /// Stored profiles.
    pub total_profiles: u64,
    /// Present only when the caller supplied an email.
    pub user: Option<DashboardUser>,
}

/// Read-side dashboard use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Compute the snapshot, optionally for one user.
    async fn snapshot(&self, email: Option<EmailAddress>) -> Result<DashboardSnapshot, Error>;
}
