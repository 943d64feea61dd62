//! Repository trait for the recent-comment indexes.

use crate::domain::entities::RecentComment;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the global and per-domain recent-comment indexes.
///
/// Both indexes hold the same entry shape; reads return entries ordered by
/// `unix_time` descending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecentCommentRepository: Send + Sync {
    /// Appends an entry to the global index.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn put_global(&self, item: RecentComment) -> Result<(), AppError>;

    /// Appends an entry to the index of `item.site_domain`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn put_domain(&self, item: RecentComment) -> Result<(), AppError>;

    /// Returns up to `limit` entries of the global index, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn recent_global(&self, limit: i64) -> Result<Vec<RecentComment>, AppError>;

    /// Returns up to `limit` entries of one domain's index, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn recent_domain(
        &self,
        site_domain: &str,
        limit: i64,
    ) -> Result<Vec<RecentComment>, AppError>;
}
