//! Utility functions for URL processing and request handling.
//!
//! - [`site_domain`] - Site domain derivation from page URLs
//! - [`client_info`] - Client IP and user agent extraction from headers

pub mod client_info;
pub mod site_domain;
