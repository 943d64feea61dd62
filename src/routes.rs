//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /comment` - Comment posting (rate limited per client IP)
//! - read endpoints  - Structures and recent-comment listings, see [`api::routes::read_routes`]
//! - `GET  /health`  - Storage probe
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive headers for localhost hosts
//! - **Rate limiting** - Per-IP token bucket on `/comment` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let comments = if behind_proxy {
        api::routes::comment_routes().layer(rate_limit::proxied_layer())
    } else {
        api::routes::comment_routes().layer(rate_limit::layer())
    };

    NormalizePathLayer::trim_trailing_slash().layer(assemble(comments, state))
}

/// Every route and middleware except rate limiting and path normalization.
///
/// Serves requests that carry no `ConnectInfo`, such as in-process test servers.
pub fn base_router(state: AppState) -> Router {
    assemble(api::routes::comment_routes(), state)
}

fn assemble(comments: Router<AppState>, state: AppState) -> Router {
    Router::new()
        .merge(comments)
        .merge(api::routes::read_routes())
        .layer(middleware::from_fn_with_state(state.clone(), cors::layer))
        .with_state(state)
        .layer(tracing::layer())
}
