//! Denormalized entries of the recent-comment indexes.

/// An entry in a reverse-chronological comment index.
///
/// The same shape is written to both the global index and the per-domain
/// index; readers receive entries newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentComment {
    pub site_domain: String,
    pub unix_time: i64,
    pub comment: String,
    pub comment_id: String,
    pub url: String,
    pub user_id: String,
}
