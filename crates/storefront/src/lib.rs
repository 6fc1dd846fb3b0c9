//! Rocketshoes Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused. [`app`] assembles the full router
//! with its middleware stack; the binary only adds Sentry and a listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_store;
pub mod catalog;
pub mod config;
pub mod error;
mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request, middleware::from_fn};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Directory static assets are served from, relative to the workspace root.
const STATIC_DIR: &str = "crates/storefront/static";

/// Build the storefront router with sessions, security headers, request IDs,
/// and request tracing.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}
