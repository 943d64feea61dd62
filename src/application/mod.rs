//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::comment_service::CommentService`] - Comment posting and recent-comment reads
//! - [`services::structure_service::StructureService`] - Page and domain counters

pub mod services;
