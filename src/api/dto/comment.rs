//! DTOs for posting and listing comments.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::PostedComment;
use crate::domain::entities::Comment;

/// Body of `POST /comment`.
///
/// Absent fields deserialize as empty strings so that the service can report
/// every missing field at once instead of failing on the first.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: String,

    #[serde(default)]
    pub comment: String,
}

/// Acknowledgement of a stored comment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub message: String,
    pub comment_id: String,
    pub site_domain: String,
    pub unix_time: i64,
}

impl From<PostedComment> for CommentResponse {
    fn from(posted: PostedComment) -> Self {
        Self {
            message: "Insert succeeded!".to_string(),
            comment_id: posted.comment_id,
            site_domain: posted.site_domain,
            unix_time: posted.unix_time,
        }
    }
}

/// Query of `GET /getCommentsByUrl`.
#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    #[serde(default)]
    pub url: String,
}

/// One comment on a page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    pub unix_time: i64,
    pub comment: String,
    pub comment_id: String,
    pub user_id: String,
}

impl From<Comment> for CommentItem {
    fn from(comment: Comment) -> Self {
        Self {
            unix_time: comment.unix_time,
            comment: comment.comment,
            comment_id: comment.comment_id,
            user_id: comment.user_id,
        }
    }
}
