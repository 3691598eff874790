//! Error types for index construction.

use thiserror::Error;

/// Errors that can occur when building the search index.
///
/// Build failures are fatal at startup: callers must not serve queries
/// against a partially built index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The parsed document produced no outline nodes at all.
    #[error("document produced no outline nodes")]
    EmptyOutline,
}
