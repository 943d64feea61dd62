//! Repository traits for the page and domain aggregate structures.
//!
//! Both traits expose the same primitive trio used by the counter protocol
//! in [`crate::application::services::StructureService`]:
//!
//! - `exists` - point lookup of the aggregate row
//! - `put` - insert-if-absent of a fresh row (counts at 1)
//! - `increment` - bump the counters of an existing row

use crate::domain::entities::{DomainStructure, PageStructure, RebuildSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for per-page structures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageStructureRepository: Send + Sync {
    /// Returns whether a structure row exists for `(site_domain, url)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, site_domain: &str, url: &str) -> Result<bool, AppError>;

    /// Inserts a new structure row unless one already exists.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the row was inserted
    /// - `Ok(false)` if a row for the same key was already present
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn put(&self, item: PageStructure) -> Result<bool, AppError>;

    /// Adds one comment to an existing row and advances `latest_unix_time`
    /// to `unix_time` unless the stored value is newer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment(&self, site_domain: &str, url: &str, unix_time: i64)
    -> Result<(), AppError>;

    /// Lists every page structure of a domain, most recently active first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_domain(&self, site_domain: &str) -> Result<Vec<PageStructure>, AppError>;
}

/// Repository interface for per-domain (global) structures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainStructureRepository: Send + Sync {
    /// Returns whether a structure row exists for `site_domain`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, site_domain: &str) -> Result<bool, AppError>;

    /// Inserts a new structure row unless one already exists.
    ///
    /// Returns `Ok(false)` if a row for the domain was already present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn put(&self, item: DomainStructure) -> Result<bool, AppError>;

    /// Adds one comment to an existing row. `url_count` grows only when
    /// `new_url` is set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment(
        &self,
        site_domain: &str,
        new_url: bool,
        unix_time: i64,
    ) -> Result<(), AppError>;

    /// Lists every domain structure, most recently active first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_all(&self) -> Result<Vec<DomainStructure>, AppError>;

    /// Recomputes every page and domain structure from the stored comments.
    ///
    /// Used to repair counters after concurrent writers raced on the same page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn rebuild(&self) -> Result<RebuildSummary, AppError>;
}
