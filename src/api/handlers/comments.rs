//! Handlers for posting comments and listing a page's comments.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use validator::Validate;

use crate::api::dto::comment::{CommentItem, CommentRequest, CommentResponse, UrlQuery};
use crate::application::services::PostComment;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::ClientMeta;

/// Stores a comment on a page.
///
/// # Endpoint
///
/// `POST /comment`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/blog/1", "comment": "Nice post" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Insert succeeded!",
///   "commentId": "8a4c0f9e-5d0b-4d43-9a3c-2f5b7c1e6d21",
///   "siteDomain": "https://example.com",
///   "unixTime": 1700000000123
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON, missing fields, an overlong
/// comment or an invalid URL. Returns 500 if a storage write fails.
pub async fn post_comment_handler(
    State(state): State<AppState>,
    client: ClientMeta,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Json<CommentResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let posted = state
        .comment_service
        .post_comment(PostComment {
            url: payload.url,
            comment: payload.comment,
            ip: client.ip,
            user_agent: client.user_agent,
        })
        .await?;

    Ok(Json(posted.into()))
}

/// Lists the most recent comments on one page, newest first.
///
/// # Endpoint
///
/// `GET /getCommentsByUrl?url=...`
pub async fn comments_by_url_handler(
    State(state): State<AppState>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<Vec<CommentItem>>, AppError> {
    let Query(query) = query?;
    let comments = state.comment_service.comments_for_url(&query.url).await?;

    Ok(Json(comments.into_iter().map(CommentItem::from).collect()))
}
