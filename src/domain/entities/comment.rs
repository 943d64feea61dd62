//! Comment entities: the raw comment item and its request log.

/// A single user comment on a page.
///
/// Comments are partitioned by page URL and ordered by `unix_time`
/// (milliseconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub url: String,
    pub unix_time: i64,
    pub comment: String,
    pub comment_id: String,
    pub user_id: String,
}

impl Comment {
    /// Creates a new Comment instance.
    pub fn new(
        url: String,
        unix_time: i64,
        comment: String,
        comment_id: String,
        user_id: String,
    ) -> Self {
        Self {
            url,
            unix_time,
            comment,
            comment_id,
            user_id,
        }
    }
}

/// Request metadata recorded alongside every posted comment.
///
/// Kept apart from [`Comment`] so that read paths never expose client
/// addresses or user agents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLog {
    pub comment_id: String,
    pub unix_time: i64,
    pub ip: String,
    pub user_agent: String,
}
