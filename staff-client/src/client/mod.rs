//! Client module - HTTP transport.
//!
//! The per-entity REST calls in [`crate::api`] are written against the
//! [`HttpClient`] trait; [`NetworkHttpClient`] is the reqwest implementation.

pub mod http;

// Re-export main types
pub use http::{HttpClient, NetworkHttpClient};
