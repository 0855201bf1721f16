//! Local web GUI that proxies browser chat requests to Perplexity.
//!
//! Endpoints:
//! - POST /api/chat - Forward a chat exchange, reply with {answer, citations, usage}
//! - everything else - Embedded static assets, `index.html` by default

mod handlers;
mod types;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use rust_embed::Embed;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::PplxError;
use crate::http::{SERVER_READ_TIMEOUT, SERVER_WRITE_TIMEOUT};
use crate::perplexity::PerplexityClient;

pub use handlers::resolve_model;
pub use types::*;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// Handler state. Immutable and shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub client: PerplexityClient,
    pub default_model: String,
}

impl AppState {
    pub fn new(client: PerplexityClient, default_model: impl Into<String>) -> Self {
        Self {
            client,
            default_model: default_model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, PplxError> {
        Ok(Self::new(
            PerplexityClient::from_config(&config.api)?,
            config.api.default_model.clone(),
        ))
    }
}

/// Create the GUI router with the default server timeouts.
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeouts(state, SERVER_READ_TIMEOUT, SERVER_WRITE_TIMEOUT)
}

/// Create the GUI router. `read` bounds reading a request body, `write`
/// bounds handling a whole request. Body size is not capped.
pub fn create_router_with_timeouts(state: AppState, read: Duration, write: Duration) -> Router {
    Router::new()
        .route(
            "/api/chat",
            post(handlers::chat)
                .fallback(handlers::post_only)
                .layer(DefaultBodyLimit::disable()),
        )
        .with_state(Arc::new(state))
        .fallback(static_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, write))
                .layer(RequestBodyTimeoutLayer::new(read)),
        )
}

/// Serve embedded static files
async fn static_handler(uri: axum::http::Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, content_type(&mime))], content.data.into_owned())
                .into_response()
        }
        None => match StaticAssets::get("index.html") {
            Some(content) => (
                [(header::CONTENT_TYPE, "text/html; charset=utf-8".to_string())],
                content.data.into_owned(),
            )
                .into_response(),
            None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        },
    }
}

fn content_type(mime: &mime_guess::Mime) -> String {
    if mime.type_() == "text" && mime.get_param("charset").is_none() {
        format!("{}; charset=utf-8", mime.essence_str())
    } else {
        mime.to_string()
    }
}
