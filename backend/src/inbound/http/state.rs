//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DashboardQuery, ExchangeRequestCommand, ExchangeRequestQuery, GigApplicationCommand,
    GigApplicationQuery, GigCommand, GigQuery, ProfileCommand, ProfileQuery, SkillExchangeCommand,
    SkillExchangeQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub gigs: Arc<dyn GigCommand>,
    pub gigs_query: Arc<dyn GigQuery>,
    pub skill_exchanges: Arc<dyn SkillExchangeCommand>,
    pub skill_exchanges_query: Arc<dyn SkillExchangeQuery>,
    pub exchange_requests: Arc<dyn ExchangeRequestCommand>,
    pub exchange_requests_query: Arc<dyn ExchangeRequestQuery>,
    pub gig_applications: Arc<dyn GigApplicationCommand>,
    pub gig_applications_query: Arc<dyn GigApplicationQuery>,
    pub profiles: Arc<dyn ProfileCommand>,
    pub profiles_query: Arc<dyn ProfileQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
}

impl HttpState {
    /// Build state from services that implement both halves of a port pair.
    ///
    /// Each service is shared between its command and query fields.
    pub fn from_services<G, S, E, A, P, D>(
        gigs: Arc<G>,
        skill_exchanges: Arc<S>,
        exchange_requests: Arc<E>,
        gig_applications: Arc<A>,
        profiles: Arc<P>,
        dashboard: Arc<D>,
    ) -> Self
    where
        G: GigCommand + GigQuery + 'static,
        S: SkillExchangeCommand + SkillExchangeQuery + 'static,
        E: ExchangeRequestCommand + ExchangeRequestQuery + 'static,
        A: GigApplicationCommand + GigApplicationQuery + 'static,
        P: ProfileCommand + ProfileQuery + 'static,
        D: DashboardQuery + 'static,
    {
        Self {
            gigs: gigs.clone(),
            gigs_query: gigs,
            skill_exchanges: skill_exchanges.clone(),
            skill_exchanges_query: skill_exchanges,
            exchange_requests: exchange_requests.clone(),
            exchange_requests_query: exchange_requests,
            gig_applications: gig_applications.clone(),
            gig_applications_query: gig_applications,
            profiles: profiles.clone(),
            profiles_query: profiles,
            dashboard,
        }
    }
}
