//! Shared harness for HTTP integration tests.
//!
//! Builds the production route table over real services backed by a fresh
//! [`MemoryStore`], with stats applied inline so counters can be asserted as
//! soon as a request returns.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::Value;

use skillx::Trace;
use skillx::domain::ports::StatsCommand;
use skillx::domain::{
    DashboardService, ExchangeRequestService, GigApplicationService, GigService, ProfileService,
    SkillExchangeService, StatsSynchronizer, TransitionPolicy,
};
use skillx::inbound::http::dashboard::get_dashboard;
use skillx::inbound::http::error::{json_error_handler, query_error_handler};
use skillx::inbound::http::exchange_requests::{
    create_exchange_request, list_exchange_requests, update_exchange_request,
};
use skillx::inbound::http::gig_applications::{
    create_gig_application, list_gig_applications, update_gig_application,
};
use skillx::inbound::http::gigs::{create_gig, delete_gig, get_gig, list_gigs};
use skillx::inbound::http::profile::{get_profile, upsert_profile};
use skillx::inbound::http::skill_exchange::{create_skill_exchange, list_skill_exchanges};
use skillx::inbound::http::state::HttpState;
use skillx::outbound::memory::MemoryStore;
use skillx::outbound::stats::InlineStatsOutbox;

/// Services over one memory store with inline stats.
pub fn memory_state(policy: TransitionPolicy) -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let synchronizer: Arc<dyn StatsCommand> = Arc::new(StatsSynchronizer::new(store.clone()));
    let outbox = Arc::new(InlineStatsOutbox::new(synchronizer));

    HttpState::from_services(
        Arc::new(GigService::new(store.clone(), outbox.clone())),
        Arc::new(SkillExchangeService::new(store.clone(), outbox.clone())),
        Arc::new(ExchangeRequestService::new(store.clone(), outbox, policy)),
        Arc::new(GigApplicationService::new(
            store.clone(),
            store.clone(),
            policy,
        )),
        Arc::new(ProfileService::new(store.clone())),
        Arc::new(DashboardService::new(store.clone(), store.clone(), store)),
    )
}

/// The `/api/v1` route table with the server's extractor configs.
pub fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .service(create_gig)
                .service(list_gigs)
                .service(get_gig)
                .service(delete_gig)
                .service(create_skill_exchange)
                .service(list_skill_exchanges)
                .service(create_exchange_request)
                .service(list_exchange_requests)
                .service(update_exchange_request)
                .service(create_gig_application)
                .service(list_gig_applications)
                .service(update_gig_application)
                .service(get_profile)
                .service(upsert_profile)
                .service(get_dashboard),
        )
}

/// Status and parsed JSON body of a response.
pub async fn read(res: ServiceResponse) -> (u16, Value) {
    let status = res.status().as_u16();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}
