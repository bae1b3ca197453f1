//! Read-only dashboard aggregation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::gig_service::map_gig_error;
use crate::domain::ports::{
    DashboardQuery, DashboardSnapshot, DashboardUser, DashboardUserStats, GigRepository,
    SkillExchangeRepository, UserProfileRepository,
};
use crate::domain::skill_exchange_service::map_skill_exchange_error;
use crate::domain::stats_synchronizer::map_profile_error;
use crate::domain::{EmailAddress, Error, UserProfile};

/// Combines collection totals with one user's headline counters.
#[derive(Clone)]
pub struct DashboardService<G, S, P> {
    gigs: Arc<G>,
    skill_exchanges: Arc<S>,
    profiles: Arc<P>,
}

impl<G, S, P> DashboardService<G, S, P> {
    /// Create a dashboard over the three repositories it counts.
    pub fn new(gigs: Arc<G>, skill_exchanges: Arc<S>, profiles: Arc<P>) -> Self {
        Self {
            gigs,
            skill_exchanges,
            profiles,
        }
    }
}

fn dashboard_user(email: EmailAddress, profile: Option<UserProfile>) -> DashboardUser {
    match profile {
        Some(profile) => DashboardUser {
            email,
            name: profile.name,
            stats: DashboardUserStats {
                gigs_posted: profile.stats.gigs_posted,
                gigs_completed: profile.stats.gigs_completed,
                skill_exchanges: profile.stats.skill_exchanges,
            },
        },
        None => DashboardUser {
            email,
            name: String::new(),
            stats: DashboardUserStats::default(),
        },
    }
}

#[async_trait]
impl<G, S, P> DashboardQuery for DashboardService<G, S, P>
where
    G: GigRepository,
    S: SkillExchangeRepository,
    P: UserProfileRepository,
{
    async fn snapshot(&self, email: Option<EmailAddress>) -> Result<DashboardSnapshot, Error> {
        let total_gigs = self.gigs.count().await.map_err(map_gig_error)?;
        let total_skill_exchanges = self
            .skill_exchanges
            .count()
            .await
            .map_err(map_skill_exchange_error)?;
        let total_profiles = self.profiles.count().await.map_err(map_profile_error)?;

        let user = match email {
            Some(email) => {
                let profile = self
                    .profiles
                    .find_by_email(&email)
                    .await
                    .map_err(map_profile_error)?;
                Some(dashboard_user(email, profile))
            }
            None => None,
        };

        Ok(DashboardSnapshot {
            total_gigs,
            total_skill_exchanges,
            total_profiles,
            user,
        })
    }
}
