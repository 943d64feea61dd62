//! A validated comment post and the records it fans out into.

use super::{Comment, CommentLog, DomainStructure, PageStructure, RecentComment};

/// Everything known about one comment at the moment it is accepted.
///
/// Built by [`crate::application::services::CommentService`] after
/// validation, id generation and timestamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSubmission {
    pub url: String,
    pub site_domain: String,
    pub comment: String,
    pub comment_id: String,
    pub user_id: String,
    pub unix_time: i64,
    pub ip: String,
    pub user_agent: String,
}

/// One record per store touched by a comment post.
///
/// The structure records are only used when the corresponding aggregate
/// row does not exist yet; otherwise the existing row is incremented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecords {
    pub comment: Comment,
    pub log: CommentLog,
    pub recent_global: RecentComment,
    pub recent_domain: RecentComment,
    pub page_structure: PageStructure,
    pub domain_structure: DomainStructure,
}

impl CommentSubmission {
    /// Fans the submission out into the records of every store.
    pub fn into_records(self) -> CommentRecords {
        let recent = RecentComment {
            site_domain: self.site_domain.clone(),
            unix_time: self.unix_time,
            comment: self.comment.clone(),
            comment_id: self.comment_id.clone(),
            url: self.url.clone(),
            user_id: self.user_id.clone(),
        };

        CommentRecords {
            comment: Comment::new(
                self.url.clone(),
                self.unix_time,
                self.comment,
                self.comment_id.clone(),
                self.user_id,
            ),
            log: CommentLog {
                comment_id: self.comment_id,
                unix_time: self.unix_time,
                ip: self.ip,
                user_agent: self.user_agent,
            },
            recent_global: recent.clone(),
            recent_domain: recent,
            page_structure: PageStructure::first(
                self.site_domain.clone(),
                self.url,
                self.unix_time,
            ),
            domain_structure: DomainStructure::first(self.site_domain, self.unix_time),
        }
    }
}
