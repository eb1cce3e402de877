//! Authentication module for the graph server's token-based logon.
//!
//! This module provides:
//! - `TokenManager`: credential exchange and token lifecycle tracking
//! - `TokenError`: classification of exchange and decoding failures
//!
//! Tokens are JWT-shaped: three dot-delimited base64url segments whose
//! payload carries an absolute `exp` claim (Unix-epoch seconds). Signature
//! verification is the server's concern, not this client's.

pub mod error;
pub mod token;

pub use error::TokenError;
pub use token::TokenManager;
