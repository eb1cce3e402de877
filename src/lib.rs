//! Client library for a remote graph-analytics server.
//!
//! The server issues short-lived JWT-shaped bearer tokens through an HTTP
//! credential exchange. This crate provides:
//!
//! - `auth::TokenManager`: acquires a token, tracks issuance and expiration,
//!   and exposes the decoded token segments
//! - `api::ApiClient`: opens authenticated sessions and runs PGQL statements
//! - `models`: typed server responses (version info, query results)
//! - `utils::format`: presentation helpers, including the token report
//!
//! The library never writes to the console; all output decisions belong to
//! the caller (see the `pgql-client` binary for an example).

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{TokenError, TokenManager};
pub use config::Config;
