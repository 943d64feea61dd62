//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in
//! [`crate::infrastructure`] and orchestrated by
//! [`crate::application::services`].
//!
//! # Comment Processing Flow
//!
//! 1. HTTP handler validates the request body
//! 2. [`entities::CommentSubmission`] is built and fanned out into records
//! 3. Raw records are written (comment, recent indexes, log)
//! 4. Page and domain structures are incremented or created

pub mod entities;
pub mod repositories;
