//! PostgreSQL implementation of the recent-comment indexes.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::RecentComment;
use crate::domain::repositories::RecentCommentRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct RecentCommentRow {
    site_domain: String,
    unix_time: i64,
    comment: String,
    comment_id: String,
    url: String,
    user_id: String,
}

impl From<RecentCommentRow> for RecentComment {
    fn from(r: RecentCommentRow) -> Self {
        RecentComment {
            site_domain: r.site_domain,
            unix_time: r.unix_time,
            comment: r.comment,
            comment_id: r.comment_id,
            url: r.url,
            user_id: r.user_id,
        }
    }
}

/// PostgreSQL repository for the global and per-domain recent indexes.
///
/// Each index is its own table with a descending `unix_time` index, so
/// "newest N" reads are a single index scan.
pub struct PgRecentCommentRepository {
    pool: Arc<PgPool>,
}

impl PgRecentCommentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecentCommentRepository for PgRecentCommentRepository {
    async fn put_global(&self, item: RecentComment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO recent_global_comments (comment_id, site_domain, unix_time, comment, url, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&item.comment_id)
        .bind(&item.site_domain)
        .bind(item.unix_time)
        .bind(&item.comment)
        .bind(&item.url)
        .bind(&item.user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn put_domain(&self, item: RecentComment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO recent_domain_comments (site_domain, comment_id, unix_time, comment, url, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&item.site_domain)
        .bind(&item.comment_id)
        .bind(item.unix_time)
        .bind(&item.comment)
        .bind(&item.url)
        .bind(&item.user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn recent_global(&self, limit: i64) -> Result<Vec<RecentComment>, AppError> {
        let rows = sqlx::query_as::<_, RecentCommentRow>(
            r#"
            SELECT site_domain, unix_time, comment, comment_id, url, user_id
            FROM recent_global_comments
            ORDER BY unix_time DESC, comment_id COLLATE "C" DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(RecentComment::from).collect())
    }

    async fn recent_domain(
        &self,
        site_domain: &str,
        limit: i64,
    ) -> Result<Vec<RecentComment>, AppError> {
        let rows = sqlx::query_as::<_, RecentCommentRow>(
            r#"
            SELECT site_domain, unix_time, comment, comment_id, url, user_id
            FROM recent_domain_comments
            WHERE site_domain = $1
            ORDER BY unix_time DESC, comment_id COLLATE "C" DESC
            LIMIT $2
            "#,
        )
        .bind(site_domain)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(RecentComment::from).collect())
    }
}
