use crate::config::Config;
use crate::services::health_service::HealthService;
use crate::services::ingest_service::IngestService;
use crate::services::query_service::QueryService;
use crate::services::stats_service::StatsService;
use crate::storage::DbPool;
use crate::storage::message_repo::MessageRepository;
use axum::body::Body;
use axum::http::Request;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod health;
pub mod messages;
pub mod middleware;
pub mod schemas;
pub mod stats;
pub mod webhook;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub ingest_service: IngestService,
    pub query_service: QueryService,
    pub stats_service: StatsService,
    pub health_service: HealthService,
}

impl AppState {
    /// Wires the per-request services onto a shared pool. All request-scoped
    /// state lives in the store; the services themselves are stateless.
    #[must_use]
    pub fn new(config: Config, pool: DbPool) -> Self {
        let repo = MessageRepository::new(pool.clone());
        Self {
            config,
            ingest_service: IngestService::new(repo.clone()),
            query_service: QueryService::new(repo.clone()),
            stats_service: StatsService::new(repo),
            health_service: HealthService::new(pool),
        }
    }
}

/// Configures and returns the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook::receive_webhook))
        .route("/messages", get(messages::list_messages))
        .route("/stats", get(stats::get_stats))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            middleware::MakeRequestUuidOrHeader,
        ))
        .with_state(state)
}
