//! API route configuration.
//!
//! Route names keep the casing existing widget clients call, including the
//! misspelled `/getRecentGlobalCommnet`, which is served next to the
//! corrected `/getRecentGlobalComment`.

use crate::api::handlers::{
    comments_by_url_handler, global_structure_handler, health_handler, page_structure_handler,
    page_structure_query_handler, post_comment_handler, recent_domain_handler,
    recent_global_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// The write endpoint.
///
/// # Endpoints
///
/// - `POST /comment` - Store a comment and update page/domain counters
pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/comment", post(post_comment_handler))
}

/// Read-only endpoints.
///
/// # Endpoints
///
/// - `GET  /getPageGlobalStructure`         - Every domain's counters
/// - `GET|POST /getPageStructureBySiteDomain` - Page counters of one domain
/// - `GET  /getRecentGlobalComment`         - Latest comments across domains
/// - `GET  /getRecentGlobalCommnet`         - Alias of the above
/// - `GET  /getRecentDomainComment`         - Latest comments of one domain
/// - `GET  /getCommentsByUrl`               - Latest comments on one page
/// - `GET  /health`                         - Storage probe
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/getPageGlobalStructure", get(global_structure_handler))
        .route(
            "/getPageStructureBySiteDomain",
            get(page_structure_query_handler).post(page_structure_handler),
        )
        .route("/getRecentGlobalComment", get(recent_global_handler))
        .route("/getRecentGlobalCommnet", get(recent_global_handler))
        .route("/getRecentDomainComment", get(recent_domain_handler))
        .route("/getCommentsByUrl", get(comments_by_url_handler))
        .route("/health", get(health_handler))
}
