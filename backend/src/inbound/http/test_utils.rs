//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::StatsCommand;
use crate::domain::{
    DashboardService, ExchangeRequestService, GigApplicationService, GigService, ProfileService,
    SkillExchangeService, StatsSynchronizer, TransitionPolicy,
};
use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;
use crate::outbound::stats::InlineStatsOutbox;

/// Real services over a fresh [`MemoryStore`], with stats applied inline so
/// tests can assert on counters right after a request returns.
pub fn memory_state(policy: TransitionPolicy) -> (web::Data<HttpState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let synchronizer: Arc<dyn StatsCommand> = Arc::new(StatsSynchronizer::new(store.clone()));
    let outbox = Arc::new(InlineStatsOutbox::new(synchronizer));

    let state = HttpState::from_services(
        Arc::new(GigService::new(store.clone(), outbox.clone())),
        Arc::new(SkillExchangeService::new(store.clone(), outbox.clone())),
        Arc::new(ExchangeRequestService::new(store.clone(), outbox, policy)),
        Arc::new(GigApplicationService::new(store.clone(), store.clone(), policy)),
        Arc::new(ProfileService::new(store.clone())),
        Arc::new(DashboardService::new(store.clone(), store.clone(), store.clone())),
    );
    (web::Data::new(state), store)
}

/// Extractor configs matching the ones installed by the server.
pub fn extractor_configs() -> (web::JsonConfig, web::QueryConfig) {
    (
        web::JsonConfig::default().error_handler(json_error_handler),
        web::QueryConfig::default().error_handler(query_error_handler),
    )
}
