//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the put / query / update primitives of the backing
//! store. Implementations live in [`crate::infrastructure`].
//!
//! # Available Repositories
//!
//! - [`CommentRepository`] - Raw comment items
//! - [`CommentLogRepository`] - Request metadata per comment
//! - [`RecentCommentRepository`] - Global and per-domain recent indexes
//! - [`PageStructureRepository`] - Per-page counters
//! - [`DomainStructureRepository`] - Per-domain counters
//! - [`HealthRepository`] - Storage liveness
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.

pub mod comment_repository;
pub mod health_repository;
pub mod recent_comment_repository;
pub mod structure_repository;

pub use comment_repository::{CommentLogRepository, CommentRepository};
pub use health_repository::HealthRepository;
pub use recent_comment_repository::RecentCommentRepository;
pub use structure_repository::{DomainStructureRepository, PageStructureRepository};

#[cfg(test)]
pub use comment_repository::{MockCommentLogRepository, MockCommentRepository};
#[cfg(test)]
pub use health_repository::MockHealthRepository;
#[cfg(test)]
pub use recent_comment_repository::MockRecentCommentRepository;
#[cfg(test)]
pub use structure_repository::{MockDomainStructureRepository, MockPageStructureRepository};
