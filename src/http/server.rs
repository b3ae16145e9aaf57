//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router and middleware stack
//! - Build the shared application state (config, route table, rewriter,
//!   allowlist, outbound client)
//! - Classify each request and dispatch to the right handler
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::http::proxy::{self, TransformParams};
use crate::http::request::RequestIdLayer;
use crate::rewrite::Rewriter;
use crate::routing::{RouteKind, RouteTable};
use crate::security::Allowlist;

/// Application state injected into handlers.
///
/// Everything here is immutable after startup; requests share it through
/// cheap Arc clones.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub routes: Arc<RouteTable>,
    pub rewriter: Arc<Rewriter>,
    pub allowlist: Arc<Allowlist>,
    pub client: reqwest::Client,
}

impl AppState {
    /// Compile the immutable per-process state from a validated config.
    pub fn from_config(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let rules = config.rewrite_rules();
        let rewriter = Rewriter::from_config(&rules);
        let routes = RouteTable::new(rules.iter().map(|r| r.alias.clone()));
        let allowlist = Allowlist::new(&config.allowlist.domains);

        // Bounded outbound timeouts: an in-flight fetch never outlives
        // the configured limits.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.upstream.connect_secs))
            .timeout(Duration::from_secs(config.upstream.request_secs))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            routes: Arc::new(routes),
            rewriter: Arc::new(rewriter),
            allowlist: Arc::new(allowlist),
            client,
        })
    }
}

/// HTTP server for the image gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(config)?;
        let router = Self::build_router(state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// A single fallback handler sees the raw request path, so the
    /// route table owns classification and repeated slashes in source
    /// URLs survive untouched.
    fn build_router(state: AppState) -> Router {
        let request_timeout =
            Duration::from_secs(state.config.upstream.request_secs.saturating_add(5));
        Router::new()
            .fallback(gateway_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.state.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main gateway handler: classify the path and dispatch.
async fn gateway_handler(
    State(state): State<AppState>,
    Query(params): Query<TransformParams>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(crate::http::request::X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        path = %path,
        width = params.width,
        height = params.height,
        quality = params.quality,
        "Dispatching request"
    );

    match state.routes.classify(&path) {
        RouteKind::Landing => landing_page(&state.config.site.canonical_url),
        RouteKind::Health => "OK".into_response(),
        RouteKind::LegacyImage { source } => {
            let source = state.rewriter.rewrite(&source);
            serve_image(&state, &source, &params).await
        }
        RouteKind::ReverseCdn { alias, rest } => match state.rewriter.invert(&alias, &rest) {
            Some(origin) if params.no_resize() => {
                proxy::passthrough(&state, &origin)
                    .await
                    .unwrap_or_else(IntoResponse::into_response)
            }
            Some(origin) => serve_image(&state, &origin, &params).await,
            None => GatewayError::UnknownAlias { alias }.into_response(),
        },
        RouteKind::Fallback => redirect_to_site(&state.config.site.canonical_url),
    }
}

async fn serve_image(state: &AppState, source: &str, params: &TransformParams) -> Response {
    proxy::transform(state, source, params)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Static informational page with a client-side redirect to the
/// canonical site.
fn landing_page(canonical_url: &str) -> Response {
    Html(format!(
        "<h3>Image CDN and compression service</h3><script>\n\
         window.location.href=\n\"{canonical_url}/\";\n</script>"
    ))
    .into_response()
}

/// 302 to the canonical site for anything the gateway does not serve.
fn redirect_to_site(canonical_url: &str) -> Response {
    match HeaderValue::from_str(canonical_url) {
        Ok(location) => {
            let mut response = StatusCode::FOUND.into_response();
            response.headers_mut().insert(header::LOCATION, location);
            response
        }
        // Unrepresentable canonical URL is a config bug; fail loudly.
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
