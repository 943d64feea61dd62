//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Schema lives in `migrations/` and is applied at startup.
//!
//! # Repositories
//!
//! - [`PgCommentRepository`] / [`PgCommentLogRepository`] - Raw comment writes
//! - [`PgRecentCommentRepository`] - Recent-comment indexes
//! - [`PgPageStructureRepository`] / [`PgDomainStructureRepository`] - Activity counters
//! - [`PgHealthRepository`] - Connection probe

pub mod pg_comment_repository;
pub mod pg_health_repository;
pub mod pg_recent_comment_repository;
pub mod pg_structure_repository;

pub use pg_comment_repository::{PgCommentLogRepository, PgCommentRepository};
pub use pg_health_repository::PgHealthRepository;
pub use pg_recent_comment_repository::PgRecentCommentRepository;
pub use pg_structure_repository::{PgDomainStructureRepository, PgPageStructureRepository};
