//! Error types for relate-account-mcp
//!
//! One enum covers every way a lookup can fail, from local validation to the
//! upstream GraphQL API. Uses thiserror for ergonomic error handling.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;

/// Failure modes of a single identity lookup
///
/// Every variant is terminal for the lookup that raised it: errors are
/// rendered into the tool result, never retried internally.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Platform failed local validation; the upstream API is never consulted
    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),

    /// Identity failed local validation; the upstream API is never consulted
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Upstream call exceeded the configured deadline
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Upstream responded with a non-success HTTP status
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// Transport succeeded but the GraphQL response carried an errors array
    #[error("GraphQL errors: {0}")]
    Upstream(String),

    /// Connection-level failures (DNS, TLS, malformed response body)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl LookupError {
    /// True for errors raised before any network I/O happened
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LookupError::InvalidPlatform(_) | LookupError::InvalidIdentity(_)
        )
    }
}
