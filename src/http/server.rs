//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (tracing, request ID)
//! - Dispatch requests through the routing and forwarding pipeline
//! - Record per-request metrics
//!
//! # Design Decisions
//! - A single wildcard route owns the whole path space; path shape is
//!   decided by the resolver, not the router, so the fixed 400 body can
//!   be produced for every non-matching path
//! - The inbound body is read up to the configured ceiling before
//!   dispatch; the response body is streamed and never buffered
//! - Errors can only be returned before the streaming response is handed
//!   to the server, which makes the "no error after first byte" rule
//!   structural rather than a runtime check

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::error::ProxyError;
use crate::http::headers::filter_request_headers;
use crate::http::upstream::{outbound_body, UpstreamClient};
use crate::observability::metrics;
use crate::routing::{build_target_url, resolver, BackendRegistry, ModelRoute};

/// Application state injected into handlers.
///
/// Everything here is immutable after startup and shared by all
/// concurrent requests without locking.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<BackendRegistry>,
    pub upstream: Arc<UpstreamClient>,
    pub max_body_bytes: usize,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ProxyError> {
        let registry = Arc::new(BackendRegistry::from_config(&config.backends));
        let upstream = Arc::new(UpstreamClient::new(&config.upstream)?);

        let state = AppState {
            registry,
            upstream,
            max_body_bytes: config.listener.max_body_bytes,
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
/// Resolves the route, forwards the request, and relays the response.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let route = match resolver::resolve(&path, &state.registry) {
        Ok(route) => route,
        Err(e) => {
            tracing::debug!(method = %method, path = %path, error = %e, "Request not routable");
            metrics::record_request(&method, e.status().as_u16(), "none", start);
            return e.into_response();
        }
    };

    let model = route.model.clone();

    tracing::debug!(
        method = %method,
        path = %path,
        model = %model,
        origin = %route.origin,
        "Proxying request"
    );

    match forward(&state, route, request).await {
        Ok(response) => {
            metrics::record_request(&method, response.status().as_u16(), &model, start);
            response
        }
        Err(e) => {
            metrics::record_request(&method, e.status().as_u16(), &model, start);
            e.into_response()
        }
    }
}

/// Forward a routed request to its backend and relay the response.
async fn forward(
    state: &AppState,
    route: ModelRoute,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let url = build_target_url(&route.origin, &route.sub_path, parts.uri.query());
    let headers = filter_request_headers(&parts.headers);

    let body_bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(map_body_error)?;
    let body = outbound_body(&parts.method, body_bytes);

    state.upstream.execute(parts.method, url, headers, body).await
}

fn map_body_error(error: axum::Error) -> ProxyError {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&error);
    while let Some(inner) = source {
        if inner.is::<http_body_util::LengthLimitError>() {
            return ProxyError::BodyTooLarge;
        }
        source = inner.source();
    }
    ProxyError::Internal(format!("failed to read request body: {}", error))
}
