//! Domain errors

use thiserror::Error;

/// Failure taxonomy of the facade.
///
/// Every variant surfaces as a user-visible notice or warning; none of them
/// aborts the process.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Database unreachable or misconfigured. Views render empty with a
    /// connectivity warning.
    #[error("database connection failed: {0}")]
    Connection(String),

    /// Request parameters are not well-formed numbers. The database is never
    /// contacted for the malformed command.
    #[error("{0}")]
    Validation(String),

    /// Business-rule violation raised by a stored procedure (insufficient
    /// inventory, capacity exceeded). Carries the procedure's message
    /// verbatim.
    #[error("{0}")]
    Rejected(String),

    /// Anything else that went wrong while talking to the database.
    #[error("unexpected database error: {0}")]
    Unexpected(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
