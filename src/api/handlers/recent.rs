//! Handlers for the recent-comment indexes.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::recent::{RecentCommentItem, SiteDomainQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recent comments across every domain.
///
/// # Endpoint
///
/// `GET /getRecentGlobalComment` (also served as `/getRecentGlobalCommnet`)
pub async fn recent_global_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecentCommentItem>>, AppError> {
    let items = state.comment_service.recent_global().await?;

    Ok(Json(items.into_iter().map(RecentCommentItem::from).collect()))
}

/// Lists the most recent comments of one domain.
///
/// # Endpoint
///
/// `GET /getRecentDomainComment?siteDomain=https://example.com`
///
/// # Errors
///
/// Returns 400 Bad Request if `siteDomain` is missing.
pub async fn recent_domain_handler(
    State(state): State<AppState>,
    query: Result<Query<SiteDomainQuery>, QueryRejection>,
) -> Result<Json<Vec<RecentCommentItem>>, AppError> {
    let Query(query) = query?;
    let items = state
        .comment_service
        .recent_domain(&query.site_domain)
        .await?;

    Ok(Json(items.into_iter().map(RecentCommentItem::from).collect()))
}
