//! DTOs for the structure endpoints.

use serde::Serialize;

use crate::domain::entities::{DomainStructure, PageStructure};

/// Aggregate of one domain.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainStructureItem {
    pub site_domain: String,
    pub url_count: i64,
    pub comment_count: i64,
    pub latest_unix_time: i64,
}

impl From<DomainStructure> for DomainStructureItem {
    fn from(s: DomainStructure) -> Self {
        Self {
            site_domain: s.site_domain,
            url_count: s.url_count,
            comment_count: s.comment_count,
            latest_unix_time: s.latest_unix_time,
        }
    }
}

/// Aggregate of one page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructureItem {
    pub url: String,
    pub comment_count: i64,
    pub latest_unix_time: i64,
}

impl From<PageStructure> for PageStructureItem {
    fn from(s: PageStructure) -> Self {
        Self {
            url: s.url,
            comment_count: s.comment_count,
            latest_unix_time: s.latest_unix_time,
        }
    }
}
