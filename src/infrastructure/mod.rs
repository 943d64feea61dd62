//! Infrastructure layer for external integrations.
//!
//! This layer implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process implementation for development and tests

pub mod memory;
pub mod persistence;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repositories::{
    CommentLogRepository, CommentRepository, DomainStructureRepository, HealthRepository,
    PageStructureRepository, RecentCommentRepository,
};
use memory::MemoryStore;
use persistence::{
    PgCommentLogRepository, PgCommentRepository, PgDomainStructureRepository,
    PgHealthRepository, PgPageStructureRepository, PgRecentCommentRepository,
};

/// One implementation of every repository, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub comments: Arc<dyn CommentRepository>,
    pub logs: Arc<dyn CommentLogRepository>,
    pub recent: Arc<dyn RecentCommentRepository>,
    pub pages: Arc<dyn PageStructureRepository>,
    pub domains: Arc<dyn DomainStructureRepository>,
    pub health: Arc<dyn HealthRepository>,
}

impl Repositories {
    /// Repositories over a PostgreSQL connection pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            logs: Arc::new(PgCommentLogRepository::new(pool.clone())),
            recent: Arc::new(PgRecentCommentRepository::new(pool.clone())),
            pages: Arc::new(PgPageStructureRepository::new(pool.clone())),
            domains: Arc::new(PgDomainStructureRepository::new(pool.clone())),
            health: Arc::new(PgHealthRepository::new(pool)),
        }
    }

    /// Repositories sharing one in-process store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            comments: store.clone(),
            logs: store.clone(),
            recent: store.clone(),
            pages: store.clone(),
            domains: store.clone(),
            health: store,
        }
    }
}
