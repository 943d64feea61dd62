//! Counter maintenance for page and domain structures.

use std::sync::Arc;

use crate::domain::entities::{DomainStructure, PageStructure, RebuildSummary, StructureUpdate};
use crate::domain::repositories::{DomainStructureRepository, PageStructureRepository};
use crate::error::AppError;
use tracing::{debug, info};

/// Service owning the page and domain aggregate structures.
///
/// Each comment is folded into both levels with the same protocol:
/// look the row up, increment it if present, otherwise insert it with
/// counts at 1. Inserts are insert-if-absent, so a writer that loses the
/// race to create a row falls back to incrementing the winner's row.
pub struct StructureService {
    pages: Arc<dyn PageStructureRepository>,
    domains: Arc<dyn DomainStructureRepository>,
}

impl StructureService {
    /// Creates a new structure service.
    pub fn new(
        pages: Arc<dyn PageStructureRepository>,
        domains: Arc<dyn DomainStructureRepository>,
    ) -> Self {
        Self { pages, domains }
    }

    /// Folds one comment on `url` into the structures of `site_domain`.
    ///
    /// # Errors
    ///
    /// Returns the first repository error; later steps are not attempted.
    pub async fn record_comment(
        &self,
        site_domain: &str,
        url: &str,
        unix_time: i64,
    ) -> Result<StructureUpdate, AppError> {
        self.apply(
            PageStructure::first(site_domain.to_string(), url.to_string(), unix_time),
            DomainStructure::first(site_domain.to_string(), unix_time),
        )
        .await
    }

    /// Applies one comment given the rows to insert if the page or domain is new.
    ///
    /// The page level runs first; the domain's `url_count` only grows when
    /// the page level created a new row.
    ///
    /// # Errors
    ///
    /// Returns the first repository error; later steps are not attempted.
    pub async fn apply(
        &self,
        page: PageStructure,
        domain: DomainStructure,
    ) -> Result<StructureUpdate, AppError> {
        let page_created = self.apply_page(page).await?;
        let domain_created = self.apply_domain(domain, page_created).await?;

        Ok(StructureUpdate {
            page_created,
            domain_created,
        })
    }

    async fn apply_page(&self, page: PageStructure) -> Result<bool, AppError> {
        let (site_domain, url, unix_time) =
            (page.site_domain.clone(), page.url.clone(), page.latest_unix_time);

        if self.pages.exists(&site_domain, &url).await? {
            debug!("Page structure exists, incrementing: {}", url);
            self.pages
                .increment(&site_domain, &url, unix_time)
                .await
                .map_err(vanished_row)?;
            return Ok(false);
        }

        if self.pages.put(page).await? {
            debug!("Page structure created: {}", url);
            metrics::counter!("page_structures_created_total").increment(1);
            return Ok(true);
        }

        debug!("Page structure created concurrently, incrementing: {}", url);
        self.pages
            .increment(&site_domain, &url, unix_time)
            .await
            .map_err(vanished_row)?;
        Ok(false)
    }

    async fn apply_domain(
        &self,
        domain: DomainStructure,
        new_url: bool,
    ) -> Result<bool, AppError> {
        let (site_domain, unix_time) = (domain.site_domain.clone(), domain.latest_unix_time);

        if self.domains.exists(&site_domain).await? {
            debug!("Domain structure exists, incrementing: {}", site_domain);
            self.domains
                .increment(&site_domain, new_url, unix_time)
                .await
                .map_err(vanished_row)?;
            return Ok(false);
        }

        if self.domains.put(domain).await? {
            debug!("Domain structure created: {}", site_domain);
            metrics::counter!("domain_structures_created_total").increment(1);
            return Ok(true);
        }

        debug!(
            "Domain structure created concurrently, incrementing: {}",
            site_domain
        );
        self.domains
            .increment(&site_domain, new_url, unix_time)
            .await
            .map_err(vanished_row)?;
        Ok(false)
    }

    /// Lists the structure of every domain, most recently active first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn global_structure(&self) -> Result<Vec<DomainStructure>, AppError> {
        self.domains.list_all().await
    }

    /// Lists the page structures of one domain, most recently active first.
    ///
    /// A trailing slash on `site_domain` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `site_domain` is empty.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn page_structure(&self, site_domain: &str) -> Result<Vec<PageStructure>, AppError> {
        let site_domain = normalize_site_domain(site_domain)
            .ok_or_else(|| AppError::missing_fields(&["siteDomain"]))?;

        self.pages.list_by_domain(site_domain).await
    }

    /// Recomputes every structure from the stored comments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn rebuild(&self) -> Result<RebuildSummary, AppError> {
        let summary = self.domains.rebuild().await?;
        info!(
            "Rebuilt structures: {} pages, {} domains",
            summary.pages, summary.domains
        );
        Ok(summary)
    }
}

/// A row seen by `exists` or `put` that is gone by `increment` is a storage
/// inconsistency, not a missing resource.
fn vanished_row(e: AppError) -> AppError {
    match e {
        AppError::NotFound { message, details } => AppError::internal(message, details),
        other => other,
    }
}

/// Trims whitespace and a trailing slash; `None` if nothing is left.
pub(crate) fn normalize_site_domain(site_domain: &str) -> Option<&str> {
    let trimmed = site_domain.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then_some(trimmed)
}
