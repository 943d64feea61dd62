//! PostgreSQL implementation of the comment and comment log repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Comment, CommentLog};
use crate::domain::repositories::{CommentLogRepository, CommentRepository};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CommentRow {
    url: String,
    unix_time: i64,
    comment: String,
    comment_id: String,
    user_id: String,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Comment::new(r.url, r.unix_time, r.comment, r.comment_id, r.user_id)
    }
}

/// PostgreSQL repository for raw comment items.
pub struct PgCommentRepository {
    pool: Arc<PgPool>,
}

impl PgCommentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn put(&self, comment: Comment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO comments (url, unix_time, comment_id, comment, user_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&comment.url)
        .bind(comment.unix_time)
        .bind(&comment.comment_id)
        .bind(&comment.comment)
        .bind(&comment.user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn latest_by_url(&self, url: &str, limit: i64) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT url, unix_time, comment, comment_id, user_id
            FROM comments
            WHERE url = $1
            ORDER BY unix_time DESC, comment_id COLLATE "C" DESC
            LIMIT $2
            "#,
        )
        .bind(url)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }
}

/// PostgreSQL repository for comment request logs.
pub struct PgCommentLogRepository {
    pool: Arc<PgPool>,
}

impl PgCommentLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentLogRepository for PgCommentLogRepository {
    async fn put(&self, log: CommentLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO comment_logs (comment_id, unix_time, ip, user_agent)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&log.comment_id)
        .bind(log.unix_time)
        .bind(&log.ip)
        .bind(&log.user_agent)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
