//! HTTP server configuration object and helpers.

use skillx::domain::TransitionPolicy;
use skillx::outbound::persistence::DbPool;
use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Default bound on queued stats events.
pub const DEFAULT_STATS_OUTBOX_CAPACITY: usize = 256;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) transition_policy: TransitionPolicy,
    pub(crate) stats_outbox_capacity: usize,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Configuration with the in-memory store and default policies.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            transition_policy: TransitionPolicy::default(),
            stats_outbox_capacity: DEFAULT_STATS_OUTBOX_CAPACITY,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, every repository port is served by PostgreSQL instead
    /// of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Choose how decided requests react to further status updates.
    #[must_use]
    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    /// Bound the stats outbox queue. Zero is raised to one.
    #[must_use]
    pub fn with_stats_outbox_capacity(mut self, capacity: usize) -> Self {
        self.stats_outbox_capacity = capacity.max(1);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
