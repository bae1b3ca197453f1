//! Prometheus request metrics for the marketplace API.
//!
//! [`marketplace_metrics`] builds the registry served at `/metrics`;
//! [`PrometheusLayer`] lets the server wrap it conditionally while keeping a
//! single app type.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use thiserror::Error;

/// Metric name prefix, e.g. `skillx_http_requests_total`.
pub const METRICS_NAMESPACE: &str = "skillx";
/// Path the Prometheus text exposition is served on.
pub const METRICS_ENDPOINT: &str = "/metrics";

/// The Prometheus registry could not be assembled.
#[derive(Debug, Error)]
#[error("failed to configure Prometheus metrics: {message}")]
pub struct MetricsSetupError {
    message: String,
}

/// Request counters and latency histograms labelled by route pattern.
///
/// Unmatched paths share one `UNKNOWN` label so requests for random URLs cannot
/// grow the series count.
pub fn marketplace_metrics() -> Result<PrometheusMetrics, MetricsSetupError> {
    PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint(METRICS_ENDPOINT)
        .mask_unmatched_patterns("UNKNOWN")
        .build()
        .map_err(|err| MetricsSetupError {
            message: err.to_string(),
        })
}

/// Optional metrics middleware with one response body type either way.
#[derive(Clone)]
pub(crate) struct PrometheusLayer(Option<Arc<PrometheusMetrics>>);

impl From<Option<PrometheusMetrics>> for PrometheusLayer {
    fn from(metrics: Option<PrometheusMetrics>) -> Self {
        Self(metrics.map(Arc::new))
    }
}

type BoxedService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

impl<S, B> Transform<S, ServiceRequest> for PrometheusLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedService;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Some(metrics) = self.0.clone() else {
            let passthrough = service.map(ServiceResponse::map_into_boxed_body);
            return Box::pin(async move { Ok(boxed::service(passthrough)) });
        };
        let wrapped = Compat::new(PrometheusMetrics::clone(&metrics)).new_transform(service);
        Box::pin(async move { Ok(boxed::service(wrapped.await?)) })
    }
}
