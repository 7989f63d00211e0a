//! HTTP Server
//!
//! Axum front door: the `/sub/` rename endpoint, a health probe and the
//! browser page for everything else.

use crate::adapters::inbound::frontend;
use crate::adapters::outbound::ResolutionCache;
use crate::application::RenameService;
use crate::domain::entities::DisplayOptions;
use crate::infrastructure::ShutdownController;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

const SUB_PREFIX: &str = "/sub/";
const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_hosts: usize,
    pub cached_ips: usize,
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RenameService>,
    pub cache: Arc<ResolutionCache>,
    /// Rendered once at start-up.
    pub page: Arc<str>,
}

impl AppState {
    pub fn new(service: Arc<RenameService>, cache: Arc<ResolutionCache>, bg_img: Option<&str>) -> Self {
        Self {
            service,
            cache,
            page: frontend::render_page(bg_img).into(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            HeaderName::from_static("x-flag"),
            HeaderName::from_static("x-suffix"),
            HeaderName::from_static("x-org"),
        ]);

    Router::new()
        .route("/health", get(health_handler))
        // `/sub/` is matched on the raw path since its tail is percent-encoded input
        .fallback(fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server for the rename endpoint.
pub struct HttpServer {
    listen_addr: String,
    state: AppState,
}

impl HttpServer {
    pub fn new(listen_addr: String, state: AppState) -> Self {
        Self { listen_addr, state }
    }

    /// Serve until `shutdown` fires, then drain in-flight requests.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self, shutdown: ShutdownController) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("node renamer listening on {}", self.listen_addr);

        axum::serve(listener, router(self.state.clone()))
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("http server stopped");
        Ok(())
    }
}

// Handler functions

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_hosts: state.cache.host_entries(),
        cached_ips: state.cache.geo_entries(),
    })
}

async fn fallback_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    match uri.path().strip_prefix(SUB_PREFIX) {
        Some(raw) => sub_handler(&state, &method, raw, uri.query(), &headers, body)
            .await
            .into_response(),
        None => Html(state.page.to_string()).into_response(),
    }
}

async fn sub_handler(
    state: &AppState,
    method: &Method,
    raw_path: &str,
    query: Option<&str>,
    headers: &HeaderMap,
    body: String,
) -> impl IntoResponse {
    let encoded = match *method {
        Method::POST => {
            let decoded = percent_decode_str(raw_path).decode_utf8_lossy();
            let input = if decoded.trim().is_empty() {
                body
            } else {
                decoded.into_owned()
            };
            let lines: Vec<String> = input.split('\n').map(str::to_string).collect();
            let options = DisplayOptions::new(
                header_flag(headers, "x-flag"),
                header_flag(headers, "x-suffix"),
                header_flag(headers, "x-org"),
            );
            state.service.process_subscription(&lines, &options).await
        }
        Method::GET => {
            let raw = match query {
                Some(q) => format!("{}?{}", raw_path, q),
                None => raw_path.to_string(),
            };
            let link = percent_decode_str(&raw).decode_utf8_lossy().into_owned();
            state
                .service
                .process_subscription(&[link], &DisplayOptions::single_link())
                .await
        }
        _ => String::new(),
    };

    ([(header::CONTENT_TYPE, PLAIN_TEXT)], encoded)
}

/// An option header is on only when its value is exactly `true`.
fn header_flag(headers: &HeaderMap, name: &str) -> bool {
    headers.get(name).and_then(|v| v.to_str().ok()) == Some("true")
}
