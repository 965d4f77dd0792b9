//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the mock handler as a catch-all fallback
//! - Wire up middleware (request ID, CORS, logging, body parsing)
//! - Bind server to listener
//! - Compose and deliver mock responses
//! - Observability (metrics, request IDs)

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::State,
    http::{Method, Uri},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::MockServerConfig;
use crate::fixtures::FixtureStore;
use crate::http::middleware::{cors, log_body, log_request, parse_body, request_span};
use crate::http::request::X_REQUEST_ID;
use crate::mock::{compose, deliver, ControlParams};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: FixtureStore,
}

/// HTTP server for the mock service.
pub struct HttpServer {
    router: Router,
    config: MockServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: MockServerConfig) -> Self {
        let state = AppState {
            store: FixtureStore::new(config.fixtures.dir.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers, outermost first.
    fn build_router(config: &MockServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(mock_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(middleware::from_fn(cors))
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(request_span)
                            .on_request(log_request),
                    )
                    .layer(middleware::from_fn_with_state(
                        config.limits.clone(),
                        parse_body,
                    ))
                    .layer(middleware::from_fn(log_body)),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            fixtures_dir = %self.config.fixtures.dir.display(),
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: every method, every path.
async fn mock_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let start_time = Instant::now();
    let raw_url = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let control = ControlParams::from_query(uri.query());
    let response = compose(&state.store, &method, raw_url, &control).await;
    let response = deliver(response, control.delay).await;

    metrics::record_request(
        method.as_str(),
        response.status.as_u16(),
        response.outcome.as_str(),
        start_time,
    );

    response.into_response()
}
