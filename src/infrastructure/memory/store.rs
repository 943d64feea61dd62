//! Single-lock in-memory implementation of the repository traits.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{
    Comment, CommentLog, DomainStructure, PageStructure, RebuildSummary, RecentComment,
};
use crate::domain::repositories::{
    CommentLogRepository, CommentRepository, DomainStructureRepository, HealthRepository,
    PageStructureRepository, RecentCommentRepository,
};
use crate::error::AppError;
use serde_json::json;

#[derive(Default)]
struct State {
    comments: Vec<Comment>,
    logs: Vec<CommentLog>,
    recent_global: Vec<RecentComment>,
    recent_domain: HashMap<String, Vec<RecentComment>>,
    pages: BTreeMap<(String, String), PageStructure>,
    domains: BTreeMap<String, DomainStructure>,
}

/// In-memory store shared by all repository traits.
///
/// Wrap it in an `Arc` once and hand clones of that `Arc` to every service.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self::default()
    }

    /// Returns every stored comment log, oldest first.
    pub async fn comment_logs(&self) -> Vec<CommentLog> {
        self.state.read().await.logs.clone()
    }
}

/// Newest first; equal timestamps fall back to the comment id, descending.
fn newest_first<T: Clone>(items: &[T], key: impl Fn(&T) -> (i64, &str), limit: i64) -> Vec<T> {
    let mut out: Vec<T> = items.to_vec();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
    out
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn put(&self, comment: Comment) -> Result<(), AppError> {
        self.state.write().await.comments.push(comment);
        Ok(())
    }

    async fn latest_by_url(&self, url: &str, limit: i64) -> Result<Vec<Comment>, AppError> {
        let state = self.state.read().await;
        let matching: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.url == url)
            .cloned()
            .collect();

        Ok(newest_first(
            &matching,
            |c| (c.unix_time, c.comment_id.as_str()),
            limit,
        ))
    }
}

#[async_trait]
impl CommentLogRepository for MemoryStore {
    async fn put(&self, log: CommentLog) -> Result<(), AppError> {
        self.state.write().await.logs.push(log);
        Ok(())
    }
}

#[async_trait]
impl RecentCommentRepository for MemoryStore {
    async fn put_global(&self, item: RecentComment) -> Result<(), AppError> {
        self.state.write().await.recent_global.push(item);
        Ok(())
    }

    async fn put_domain(&self, item: RecentComment) -> Result<(), AppError> {
        self.state
            .write()
            .await
            .recent_domain
            .entry(item.site_domain.clone())
            .or_default()
            .push(item);
        Ok(())
    }

    async fn recent_global(&self, limit: i64) -> Result<Vec<RecentComment>, AppError> {
        let state = self.state.read().await;
        Ok(newest_first(
            &state.recent_global,
            |c| (c.unix_time, c.comment_id.as_str()),
            limit,
        ))
    }

    async fn recent_domain(
        &self,
        site_domain: &str,
        limit: i64,
    ) -> Result<Vec<RecentComment>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .recent_domain
            .get(site_domain)
            .map(|items| {
                newest_first(items, |c| (c.unix_time, c.comment_id.as_str()), limit)
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl PageStructureRepository for MemoryStore {
    async fn exists(&self, site_domain: &str, url: &str) -> Result<bool, AppError> {
        let key = (site_domain.to_string(), url.to_string());
        Ok(self.state.read().await.pages.contains_key(&key))
    }

    async fn put(&self, item: PageStructure) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let key = (item.site_domain.clone(), item.url.clone());
        if state.pages.contains_key(&key) {
            return Ok(false);
        }
        state.pages.insert(key, item);
        Ok(true)
    }

    async fn increment(
        &self,
        site_domain: &str,
        url: &str,
        unix_time: i64,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let key = (site_domain.to_string(), url.to_string());
        let page = state.pages.get_mut(&key).ok_or_else(|| {
            AppError::not_found(
                "Page structure not found",
                json!({ "site_domain": site_domain, "url": url }),
            )
        })?;

        page.comment_count += 1;
        page.latest_unix_time = page.latest_unix_time.max(unix_time);
        Ok(())
    }

    async fn list_by_domain(&self, site_domain: &str) -> Result<Vec<PageStructure>, AppError> {
        let state = self.state.read().await;
        let mut pages: Vec<PageStructure> = state
            .pages
            .values()
            .filter(|p| p.site_domain == site_domain)
            .cloned()
            .collect();

        pages.sort_by(|a, b| {
            b.latest_unix_time
                .cmp(&a.latest_unix_time)
                .then_with(|| a.url.cmp(&b.url))
        });
        Ok(pages)
    }
}

#[async_trait]
impl DomainStructureRepository for MemoryStore {
    async fn exists(&self, site_domain: &str) -> Result<bool, AppError> {
        Ok(self.state.read().await.domains.contains_key(site_domain))
    }

    async fn put(&self, item: DomainStructure) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        if state.domains.contains_key(&item.site_domain) {
            return Ok(false);
        }
        state.domains.insert(item.site_domain.clone(), item);
        Ok(true)
    }

    async fn increment(
        &self,
        site_domain: &str,
        new_url: bool,
        unix_time: i64,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let domain = state.domains.get_mut(site_domain).ok_or_else(|| {
            AppError::not_found(
                "Domain structure not found",
                json!({ "site_domain": site_domain }),
            )
        })?;

        if new_url {
            domain.url_count += 1;
        }
        domain.comment_count += 1;
        domain.latest_unix_time = domain.latest_unix_time.max(unix_time);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<DomainStructure>, AppError> {
        let state = self.state.read().await;
        let mut domains: Vec<DomainStructure> = state.domains.values().cloned().collect();

        domains.sort_by(|a, b| {
            b.latest_unix_time
                .cmp(&a.latest_unix_time)
                .then_with(|| a.site_domain.cmp(&b.site_domain))
        });
        Ok(domains)
    }

    async fn rebuild(&self) -> Result<RebuildSummary, AppError> {
        let mut state = self.state.write().await;

        let mut pages: BTreeMap<(String, String), PageStructure> = BTreeMap::new();
        for item in state.recent_domain.values().flatten() {
            pages
                .entry((item.site_domain.clone(), item.url.clone()))
                .and_modify(|p| {
                    p.comment_count += 1;
                    p.latest_unix_time = p.latest_unix_time.max(item.unix_time);
                })
                .or_insert_with(|| {
                    PageStructure::first(item.site_domain.clone(), item.url.clone(), item.unix_time)
                });
        }

        let mut domains: BTreeMap<String, DomainStructure> = BTreeMap::new();
        for page in pages.values() {
            domains
                .entry(page.site_domain.clone())
                .and_modify(|d| {
                    d.url_count += 1;
                    d.comment_count += page.comment_count;
                    d.latest_unix_time = d.latest_unix_time.max(page.latest_unix_time);
                })
                .or_insert_with(|| DomainStructure {
                    site_domain: page.site_domain.clone(),
                    url_count: 1,
                    comment_count: page.comment_count,
                    latest_unix_time: page.latest_unix_time,
                });
        }

        let summary = RebuildSummary {
            pages: pages.len() as u64,
            domains: domains.len() as u64,
        };
        state.pages = pages;
        state.domains = domains;

        Ok(summary)
    }
}

#[async_trait]
impl HealthRepository for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recent(domain: &str, url: &str, id: &str, unix_time: i64) -> RecentComment {
        RecentComment {
            site_domain: domain.to_string(),
            unix_time,
            comment: format!("comment {id}"),
            comment_id: id.to_string(),
            url: url.to_string(),
            user_id: "1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_recent_global_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        for (id, t) in [("a", 10), ("b", 30), ("c", 20)] {
            store
                .put_global(recent("https://x.com", "https://x.com/1", id, t))
                .await
                .unwrap();
        }

        let items = store.recent_global(2).await.unwrap();

        let ids: Vec<&str> = items.iter().map(|c| c.comment_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_recent_global_breaks_time_ties_by_comment_id() {
        let store = MemoryStore::new();
        for id in ["b", "c", "a"] {
            store
                .put_global(recent("https://x.com", "https://x.com/1", id, 10))
                .await
                .unwrap();
        }

        let items = store.recent_global(2).await.unwrap();

        let ids: Vec<&str> = items.iter().map(|c| c.comment_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_recent_domain_is_scoped() {
        let store = MemoryStore::new();
        store
            .put_domain(recent("https://x.com", "https://x.com/1", "a", 1))
            .await
            .unwrap();
        store
            .put_domain(recent("https://y.com", "https://y.com/1", "b", 2))
            .await
            .unwrap();

        let items = store.recent_domain("https://x.com", 100).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].comment_id, "a");

        assert!(
            store
                .recent_domain("https://z.com", 100)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_page_put_is_insert_if_absent() {
        let store = MemoryStore::new();
        let page = PageStructure::first("https://x.com".into(), "https://x.com/1".into(), 5);

        assert!(PageStructureRepository::put(&store, page.clone()).await.unwrap());
        assert!(!PageStructureRepository::put(&store, page).await.unwrap());
    }

    #[tokio::test]
    async fn test_page_increment_keeps_latest_time_monotonic() {
        let store = MemoryStore::new();
        let page = PageStructure::first("https://x.com".into(), "https://x.com/1".into(), 50);
        PageStructureRepository::put(&store, page).await.unwrap();

        PageStructureRepository::increment(&store, "https://x.com", "https://x.com/1", 40)
            .await
            .unwrap();

        let pages = store.list_by_domain("https://x.com").await.unwrap();
        assert_eq!(pages[0].comment_count, 2);
        assert_eq!(pages[0].latest_unix_time, 50);
    }

    #[tokio::test]
    async fn test_increment_missing_row_is_not_found() {
        let store = MemoryStore::new();

        let result =
            PageStructureRepository::increment(&store, "https://x.com", "https://x.com/1", 1)
                .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));

        let result = DomainStructureRepository::increment(&store, "https://x.com", true, 1).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_domain_increment_counts_new_urls_only_when_flagged() {
        let store = MemoryStore::new();
        DomainStructureRepository::put(&store, DomainStructure::first("https://x.com".into(), 1))
            .await
            .unwrap();

        DomainStructureRepository::increment(&store, "https://x.com", false, 2)
            .await
            .unwrap();
        DomainStructureRepository::increment(&store, "https://x.com", true, 3)
            .await
            .unwrap();

        let domains = store.list_all().await.unwrap();
        assert_eq!(domains[0].url_count, 2);
        assert_eq!(domains[0].comment_count, 3);
        assert_eq!(domains[0].latest_unix_time, 3);
    }

    #[tokio::test]
    async fn test_rebuild_recomputes_from_domain_index() {
        let store = MemoryStore::new();
        store
            .put_domain(recent("https://x.com", "https://x.com/1", "a", 1))
            .await
            .unwrap();
        store
            .put_domain(recent("https://x.com", "https://x.com/1", "b", 4))
            .await
            .unwrap();
        store
            .put_domain(recent("https://x.com", "https://x.com/2", "c", 2))
            .await
            .unwrap();
        store
            .put_domain(recent("https://y.com", "https://y.com/1", "d", 3))
            .await
            .unwrap();

        let summary = store.rebuild().await.unwrap();
        assert_eq!(summary, RebuildSummary { pages: 3, domains: 2 });

        let domains = store.list_all().await.unwrap();
        let x = domains
            .iter()
            .find(|d| d.site_domain == "https://x.com")
            .unwrap();
        assert_eq!(x.url_count, 2);
        assert_eq!(x.comment_count, 3);
        assert_eq!(x.latest_unix_time, 4);

        let pages = store.list_by_domain("https://x.com").await.unwrap();
        assert_eq!(pages[0].url, "https://x.com/1");
        assert_eq!(pages[0].comment_count, 2);
    }
}
