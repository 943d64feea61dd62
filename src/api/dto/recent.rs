//! DTOs for the recent-comment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::RecentComment;

/// Query carrying a site domain.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDomainQuery {
    #[serde(default)]
    pub site_domain: String,
}

/// One entry of a recent-comment index.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCommentItem {
    pub unix_time: i64,
    pub comment: String,
    pub comment_id: String,
    pub url: String,
    pub user_id: String,
}

impl From<RecentComment> for RecentCommentItem {
    fn from(item: RecentComment) -> Self {
        Self {
            unix_time: item.unix_time,
            comment: item.comment,
            comment_id: item.comment_id,
            url: item.url,
            user_id: item.user_id,
        }
    }
}
