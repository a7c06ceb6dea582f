//! Error types for MARC record model operations.
//!
//! This module provides the [`MarcError`] type for all model operations
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all MARC record model operations.
///
/// The model is deliberately hard to fail: queries with no matches, deletes
/// with no matches, and empty mutations are all valid no-ops. The variants
/// below cover the few conditions that are refused outright.
#[derive(Error, Debug)]
pub enum MarcError {
    /// A query that is ambiguous without criteria (`has_all`/`has_any`)
    /// was called with none.
    #[error("at least one criterion must be given to {0}")]
    NoCriteria(&'static str),

    /// A record type literal that is not one of the five recognized names.
    #[error("invalid record type: {0}")]
    InvalidRecordType(String),
}

/// Convenience type alias for [`std::result::Result`] with [`MarcError`].
pub type Result<T> = std::result::Result<T, MarcError>;
