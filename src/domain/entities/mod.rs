//! Core domain entities representing the comment data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`Comment`] - A single user comment on a page
//! - [`CommentLog`] - Request metadata captured with a comment
//! - [`RecentComment`] - An entry of the global or per-domain recent index
//! - [`PageStructure`] / [`DomainStructure`] - Denormalized activity counters
//!
//! [`CommentSubmission`] describes one accepted post; its
//! [`CommentSubmission::into_records`] yields the record for every store.

pub mod comment;
pub mod recent_comment;
pub mod structure;
pub mod submission;

pub use comment::{Comment, CommentLog};
pub use recent_comment::RecentComment;
pub use structure::{DomainStructure, PageStructure, RebuildSummary, StructureUpdate};
pub use submission::{CommentRecords, CommentSubmission};
