//! PostgreSQL implementation of the page and domain structure repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{DomainStructure, PageStructure, RebuildSummary};
use crate::domain::repositories::{DomainStructureRepository, PageStructureRepository};
use crate::error::AppError;
use serde_json::json;

#[derive(sqlx::FromRow)]
struct PageStructureRow {
    site_domain: String,
    url: String,
    comment_count: i64,
    latest_unix_time: i64,
}

impl From<PageStructureRow> for PageStructure {
    fn from(r: PageStructureRow) -> Self {
        PageStructure {
            site_domain: r.site_domain,
            url: r.url,
            comment_count: r.comment_count,
            latest_unix_time: r.latest_unix_time,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DomainStructureRow {
    site_domain: String,
    url_count: i64,
    comment_count: i64,
    latest_unix_time: i64,
}

impl From<DomainStructureRow> for DomainStructure {
    fn from(r: DomainStructureRow) -> Self {
        DomainStructure {
            site_domain: r.site_domain,
            url_count: r.url_count,
            comment_count: r.comment_count,
            latest_unix_time: r.latest_unix_time,
        }
    }
}

/// PostgreSQL repository for per-page structures.
///
/// `put` is `INSERT ... ON CONFLICT DO NOTHING`, so two writers racing on
/// the first comment of a page never produce two rows; the loser sees
/// `Ok(false)` and increments instead.
pub struct PgPageStructureRepository {
    pool: Arc<PgPool>,
}

impl PgPageStructureRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageStructureRepository for PgPageStructureRepository {
    async fn exists(&self, site_domain: &str, url: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM page_structures WHERE site_domain = $1 AND url = $2
            )
            "#,
        )
        .bind(site_domain)
        .bind(url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn put(&self, item: PageStructure) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO page_structures (site_domain, url, comment_count, latest_unix_time)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (site_domain, url) DO NOTHING
            "#,
        )
        .bind(&item.site_domain)
        .bind(&item.url)
        .bind(item.comment_count)
        .bind(item.latest_unix_time)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn increment(
        &self,
        site_domain: &str,
        url: &str,
        unix_time: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE page_structures SET
                comment_count    = comment_count + 1,
                latest_unix_time = GREATEST(latest_unix_time, $3)
            WHERE site_domain = $1 AND url = $2
            "#,
        )
        .bind(site_domain)
        .bind(url)
        .bind(unix_time)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Page structure not found",
                json!({ "site_domain": site_domain, "url": url }),
            ));
        }

        Ok(())
    }

    async fn list_by_domain(&self, site_domain: &str) -> Result<Vec<PageStructure>, AppError> {
        let rows = sqlx::query_as::<_, PageStructureRow>(
            r#"
            SELECT site_domain, url, comment_count, latest_unix_time
            FROM page_structures
            WHERE site_domain = $1
            ORDER BY latest_unix_time DESC, url
            "#,
        )
        .bind(site_domain)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(PageStructure::from).collect())
    }
}

/// PostgreSQL repository for per-domain structures.
pub struct PgDomainStructureRepository {
    pool: Arc<PgPool>,
}

impl PgDomainStructureRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainStructureRepository for PgDomainStructureRepository {
    async fn exists(&self, site_domain: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM domain_structures WHERE site_domain = $1)",
        )
        .bind(site_domain)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn put(&self, item: DomainStructure) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO domain_structures (site_domain, url_count, comment_count, latest_unix_time)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (site_domain) DO NOTHING
            "#,
        )
        .bind(&item.site_domain)
        .bind(item.url_count)
        .bind(item.comment_count)
        .bind(item.latest_unix_time)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn increment(
        &self,
        site_domain: &str,
        new_url: bool,
        unix_time: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE domain_structures SET
                url_count        = url_count + CASE WHEN $2 THEN 1 ELSE 0 END,
                comment_count    = comment_count + 1,
                latest_unix_time = GREATEST(latest_unix_time, $3)
            WHERE site_domain = $1
            "#,
        )
        .bind(site_domain)
        .bind(new_url)
        .bind(unix_time)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Domain structure not found",
                json!({ "site_domain": site_domain }),
            ));
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<DomainStructure>, AppError> {
        let rows = sqlx::query_as::<_, DomainStructureRow>(
            r#"
            SELECT site_domain, url_count, comment_count, latest_unix_time
            FROM domain_structures
            ORDER BY latest_unix_time DESC, site_domain
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(DomainStructure::from).collect())
    }

    async fn rebuild(&self) -> Result<RebuildSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        // Every comment has exactly one entry in the per-domain index, which
        // is the only store that carries both the site domain and the URL.
        sqlx::query("DELETE FROM page_structures")
            .execute(&mut *tx)
            .await?;

        let pages = sqlx::query(
            r#"
            INSERT INTO page_structures (site_domain, url, comment_count, latest_unix_time)
            SELECT site_domain, url, COUNT(*), MAX(unix_time)
            FROM recent_domain_comments
            GROUP BY site_domain, url
            "#,
        )
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM domain_structures")
            .execute(&mut *tx)
            .await?;

        let domains = sqlx::query(
            r#"
            INSERT INTO domain_structures (site_domain, url_count, comment_count, latest_unix_time)
            SELECT site_domain, COUNT(*), SUM(comment_count)::BIGINT, MAX(latest_unix_time)
            FROM page_structures
            GROUP BY site_domain
            "#,
        )
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        Ok(RebuildSummary { pages, domains })
    }
}
