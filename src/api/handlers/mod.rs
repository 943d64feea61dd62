//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod comments;
pub mod health;
pub mod recent;
pub mod structures;

pub use comments::{comments_by_url_handler, post_comment_handler};
pub use health::health_handler;
pub use recent::{recent_domain_handler, recent_global_handler};
pub use structures::{
    global_structure_handler, page_structure_handler, page_structure_query_handler,
};
