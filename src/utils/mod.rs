//! Utility functions for display formatting.

pub mod format;

pub use format::{format_row, format_secs, token_report};
