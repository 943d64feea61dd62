//! Comment posting and comment read models.

use std::sync::Arc;

use crate::application::services::StructureService;
use crate::application::services::structure_service::normalize_site_domain;
use crate::domain::entities::{Comment, CommentSubmission, RecentComment, StructureUpdate};
use crate::domain::repositories::{
    CommentLogRepository, CommentRepository, RecentCommentRepository,
};
use crate::error::AppError;
use crate::utils::site_domain::site_domain;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

/// Limits applied by [`CommentService`].
#[derive(Debug, Clone)]
pub struct CommentSettings {
    /// Maximum entries returned by list reads.
    pub recent_limit: i64,
    /// Maximum comment length in characters.
    pub max_comment_length: usize,
    /// User id stamped on every comment.
    pub anonymous_user_id: String,
}

impl Default for CommentSettings {
    fn default() -> Self {
        Self {
            recent_limit: 100,
            max_comment_length: 4000,
            anonymous_user_id: "1".to_string(),
        }
    }
}

/// A comment as received from a client.
#[derive(Debug, Clone)]
pub struct PostComment {
    pub url: String,
    pub comment: String,
    pub ip: String,
    pub user_agent: String,
}

/// Outcome of a successful post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    pub comment_id: String,
    pub site_domain: String,
    pub unix_time: i64,
    pub structure: StructureUpdate,
}

/// Service accepting comments and serving the comment indexes.
///
/// A post is written to every store in a fixed order: the comment item,
/// the global recent index, the domain recent index, the request log and
/// finally the page/domain structures. Writes are not transactional; the
/// first failure aborts the remaining steps.
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    logs: Arc<dyn CommentLogRepository>,
    recent: Arc<dyn RecentCommentRepository>,
    structures: Arc<StructureService>,
    settings: CommentSettings,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        logs: Arc<dyn CommentLogRepository>,
        recent: Arc<dyn RecentCommentRepository>,
        structures: Arc<StructureService>,
        settings: CommentSettings,
    ) -> Self {
        Self {
            comments,
            logs,
            recent,
            structures,
            settings,
        }
    }

    /// Validates and stores a comment, then updates the structures.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `url` or `comment` is empty
    /// - the comment exceeds the configured length
    /// - the URL is not an absolute HTTP(S) URL
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn post_comment(&self, post: PostComment) -> Result<PostedComment, AppError> {
        let url = post.url.trim().to_string();
        let comment = post.comment.trim().to_string();

        let missing: Vec<&str> = [("url", url.is_empty()), ("comment", comment.is_empty())]
            .into_iter()
            .filter_map(|(field, empty)| empty.then_some(field))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }

        let length = comment.chars().count();
        if length > self.settings.max_comment_length {
            return Err(AppError::bad_request(
                "Comment is too long",
                json!({ "length": length, "max": self.settings.max_comment_length }),
            ));
        }

        let site_domain = site_domain(&url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let submission = CommentSubmission {
            url,
            site_domain,
            comment,
            comment_id: Uuid::now_v7().to_string(),
            user_id: self.settings.anonymous_user_id.clone(),
            unix_time: Utc::now().timestamp_millis(),
            ip: post.ip,
            user_agent: post.user_agent,
        };
        let (comment_id, site_domain, unix_time) = (
            submission.comment_id.clone(),
            submission.site_domain.clone(),
            submission.unix_time,
        );
        let records = submission.into_records();

        self.comments.put(records.comment).await?;
        self.recent.put_global(records.recent_global).await?;
        self.recent.put_domain(records.recent_domain).await?;
        self.logs.put(records.log).await?;
        debug!("Comment {} stored, updating structures", comment_id);

        let structure = self
            .structures
            .apply(records.page_structure, records.domain_structure)
            .await?;

        metrics::counter!("comments_posted_total").increment(1);
        info!("Comment {} posted on {}", comment_id, site_domain);

        Ok(PostedComment {
            comment_id,
            site_domain,
            unix_time,
            structure,
        })
    }

    /// Most recent comments across all domains, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn recent_global(&self) -> Result<Vec<RecentComment>, AppError> {
        self.recent.recent_global(self.settings.recent_limit).await
    }

    /// Most recent comments of one domain, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `site_domain` is empty.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn recent_domain(&self, site_domain: &str) -> Result<Vec<RecentComment>, AppError> {
        let site_domain = normalize_site_domain(site_domain)
            .ok_or_else(|| AppError::missing_fields(&["siteDomain"]))?;

        self.recent
            .recent_domain(site_domain, self.settings.recent_limit)
            .await
    }

    /// Most recent comments on one page, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is empty.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn comments_for_url(&self, url: &str) -> Result<Vec<Comment>, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::missing_fields(&["url"]));
        }

        self.comments
            .latest_by_url(url, self.settings.recent_limit)
            .await
    }
}
