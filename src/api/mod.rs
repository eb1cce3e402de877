//! REST API client module for the graph server's session surface.
//!
//! This module provides the `ApiClient` for opening sessions and running
//! PGQL statements once a bearer token has been obtained through
//! `auth::TokenManager`. It is deliberately thin: no pooling, paging or
//! retry machinery beyond what reqwest provides.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
