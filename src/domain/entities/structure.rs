//! Aggregate structures maintained by the counter protocol.
//!
//! Two levels exist:
//!
//! - [`PageStructure`] - one row per `(site_domain, url)`
//! - [`DomainStructure`] - one row per `site_domain`, rolled up over its pages

/// Per-page aggregate: how many comments a URL received and when the last one arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStructure {
    pub site_domain: String,
    pub url: String,
    pub comment_count: i64,
    pub latest_unix_time: i64,
}

impl PageStructure {
    /// The row inserted for the first comment on a page.
    pub fn first(site_domain: String, url: String, unix_time: i64) -> Self {
        Self {
            site_domain,
            url,
            comment_count: 1,
            latest_unix_time: unix_time,
        }
    }
}

/// Per-domain aggregate rolled up across every page of the domain.
///
/// `url_count` counts distinct pages that have been commented on,
/// `comment_count` counts every comment posted anywhere on the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStructure {
    pub site_domain: String,
    pub url_count: i64,
    pub comment_count: i64,
    pub latest_unix_time: i64,
}

impl DomainStructure {
    /// The row inserted for the first comment on a domain.
    pub fn first(site_domain: String, unix_time: i64) -> Self {
        Self {
            site_domain,
            url_count: 1,
            comment_count: 1,
            latest_unix_time: unix_time,
        }
    }
}

/// Which rows the counter protocol created (as opposed to incremented).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureUpdate {
    pub page_created: bool,
    pub domain_created: bool,
}

/// Row counts produced by a full structure rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    pub pages: u64,
    pub domains: u64,
}
