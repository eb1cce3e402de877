//! Data models for graph server responses.
//!
//! This module contains the typed payloads the thin API client consumes:
//!
//! - `VersionInfo`: server release/API/PGQL versions
//! - `SessionInfo`: handle for an opened session
//! - `QueryResultSet`: columns and rows of one PGQL statement

pub mod query;
pub mod version;

pub use query::{QueryResultSet, SessionInfo};
pub use version::VersionInfo;
