//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization with camelCase
//! keys, and validator for input validation.

pub mod comment;
pub mod health;
pub mod recent;
pub mod structure;
