//! Handlers for the page and domain structures.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

use crate::api::dto::recent::SiteDomainQuery;
use crate::api::dto::structure::{DomainStructureItem, PageStructureItem};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the structure of every domain, most recently active first.
///
/// # Endpoint
///
/// `GET /getPageGlobalStructure`
///
/// # Response
///
/// ```json
/// [
///   {
///     "siteDomain": "https://example.com",
///     "urlCount": 3,
///     "commentCount": 12,
///     "latestUnixTime": 1700000000123
///   }
/// ]
/// ```
pub async fn global_structure_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<DomainStructureItem>>, AppError> {
    let domains = state.structure_service.global_structure().await?;

    Ok(Json(
        domains.into_iter().map(DomainStructureItem::from).collect(),
    ))
}

/// Lists the page structures of one domain, with `siteDomain` in a JSON body.
///
/// # Endpoint
///
/// `POST /getPageStructureBySiteDomain`
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON or a missing `siteDomain`.
pub async fn page_structure_handler(
    State(state): State<AppState>,
    payload: Result<Json<SiteDomainQuery>, JsonRejection>,
) -> Result<Json<Vec<PageStructureItem>>, AppError> {
    let Json(payload) = payload?;
    page_structure(&state, &payload.site_domain).await
}

/// Lists the page structures of one domain, with `siteDomain` in the query.
///
/// # Endpoint
///
/// `GET /getPageStructureBySiteDomain?siteDomain=https://example.com`
pub async fn page_structure_query_handler(
    State(state): State<AppState>,
    query: Result<Query<SiteDomainQuery>, QueryRejection>,
) -> Result<Json<Vec<PageStructureItem>>, AppError> {
    let Query(query) = query?;
    page_structure(&state, &query.site_domain).await
}

async fn page_structure(
    state: &AppState,
    site_domain: &str,
) -> Result<Json<Vec<PageStructureItem>>, AppError> {
    let pages = state.structure_service.page_structure(site_domain).await?;

    Ok(Json(pages.into_iter().map(PageStructureItem::from).collect()))
}
