//! Repository traits for raw comment items and their request logs.

use crate::domain::entities::{Comment, CommentLog};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for comment items.
///
/// Comments are keyed by page URL and ordered by timestamp.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCommentRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a comment item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn put(&self, comment: Comment) -> Result<(), AppError>;

    /// Returns up to `limit` comments for a page URL, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn latest_by_url(&self, url: &str, limit: i64) -> Result<Vec<Comment>, AppError>;
}

/// Repository interface for comment request logs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentLogRepository: Send + Sync {
    /// Stores the request metadata of a comment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn put(&self, log: CommentLog) -> Result<(), AppError>;
}
