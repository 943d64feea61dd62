//! Business logic services for the application layer.

pub mod comment_service;
pub mod structure_service;

pub use comment_service::{CommentService, CommentSettings, PostComment, PostedComment};
pub use structure_service::StructureService;
