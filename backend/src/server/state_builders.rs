//! Builders wiring repositories, services and the stats outbox into
//! [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use skillx::domain::ports::{
    ExchangeRequestRepository, GigApplicationRepository, GigRepository, SkillExchangeRepository,
    StatsCommand, StatsOutbox, UserProfileRepository,
};
use skillx::domain::{
    DashboardService, ExchangeRequestService, GigApplicationService, GigService, ProfileService,
    SkillExchangeService, StatsSynchronizer, TransitionPolicy,
};
use skillx::inbound::http::state::HttpState;
use skillx::outbound::memory::MemoryStore;
use skillx::outbound::persistence::{
    DbPool, DieselExchangeRequestRepository, DieselGigApplicationRepository, DieselGigRepository,
    DieselSkillExchangeRepository, DieselUserProfileRepository,
};
use skillx::outbound::stats::ChannelStatsOutbox;

use super::ServerConfig;

/// One adapter per driven repository port.
struct Repositories<G, S, E, A, P> {
    gigs: Arc<G>,
    skill_exchanges: Arc<S>,
    exchange_requests: Arc<E>,
    gig_applications: Arc<A>,
    profiles: Arc<P>,
}

impl Repositories<MemoryStore, MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            gigs: store.clone(),
            skill_exchanges: store.clone(),
            exchange_requests: store.clone(),
            gig_applications: store.clone(),
            profiles: store,
        }
    }
}

impl
    Repositories<
        DieselGigRepository,
        DieselSkillExchangeRepository,
        DieselExchangeRequestRepository,
        DieselGigApplicationRepository,
        DieselUserProfileRepository,
    >
{
    fn diesel(pool: &DbPool) -> Self {
        Self {
            gigs: Arc::new(DieselGigRepository::new(pool.clone())),
            skill_exchanges: Arc::new(DieselSkillExchangeRepository::new(pool.clone())),
            exchange_requests: Arc::new(DieselExchangeRequestRepository::new(pool.clone())),
            gig_applications: Arc::new(DieselGigApplicationRepository::new(pool.clone())),
            profiles: Arc::new(DieselUserProfileRepository::new(pool.clone())),
        }
    }
}

impl<G, S, E, A, P> Repositories<G, S, E, A, P>
where
    G: GigRepository + 'static,
    S: SkillExchangeRepository + 'static,
    E: ExchangeRequestRepository + 'static,
    A: GigApplicationRepository + 'static,
    P: UserProfileRepository + 'static,
{
    /// Spawn the stats worker over these repositories and build the services.
    fn into_state(self, policy: TransitionPolicy, outbox_capacity: usize) -> HttpState {
        let synchronizer: Arc<dyn StatsCommand> =
            Arc::new(StatsSynchronizer::new(self.profiles.clone()));
        // Detached; the worker exits once every publisher is dropped.
        let (outbox, _worker) = ChannelStatsOutbox::spawn(synchronizer, outbox_capacity);
        let outbox: Arc<dyn StatsOutbox> = Arc::new(outbox);

        HttpState::from_services(
            Arc::new(GigService::new(self.gigs.clone(), outbox.clone())),
            Arc::new(SkillExchangeService::new(
                self.skill_exchanges.clone(),
                outbox.clone(),
            )),
            Arc::new(ExchangeRequestService::new(
                self.exchange_requests,
                outbox,
                policy,
            )),
            Arc::new(GigApplicationService::new(
                self.gig_applications,
                self.gigs.clone(),
                policy,
            )),
            Arc::new(ProfileService::new(self.profiles.clone())),
            Arc::new(DashboardService::new(
                self.gigs,
                self.skill_exchanges,
                self.profiles,
            )),
        )
    }
}

/// Build the shared HTTP state for `config`.
///
/// Uses PostgreSQL repositories when a pool is configured, otherwise a single
/// in-memory store. Must run inside a Tokio runtime because the stats worker
/// is spawned here.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let policy = config.transition_policy;
    let capacity = config.stats_outbox_capacity;
    let state = match &config.db_pool {
        Some(pool) => {
            info!(backend = "postgres", ?policy, capacity, "building repositories");
            Repositories::diesel(pool).into_state(policy, capacity)
        }
        None => {
            info!(backend = "memory", ?policy, capacity, "building repositories");
            Repositories::in_memory().into_state(policy, capacity)
        }
    };
    web::Data::new(state)
}
