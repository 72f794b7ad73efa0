// Error surface for the session facade.
// Decision: one enum for the whole crate — the HTTP layer maps variants
// to whatever status each route pins

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the session facade and its helpers
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration value is missing or empty
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Connection, query, or credential error reported by SurrealDB
    #[error(transparent)]
    Database(#[from] surrealdb::Error),

    /// An operation that needs a session was called without one
    #[error("not authenticated")]
    NotAuthenticated,

    /// GitHub OAuth was requested but no client credentials are configured
    #[error("GitHub OAuth is not configured")]
    OAuthNotConfigured,

    /// The OAuth callback arrived without an authorization code
    #[error("missing authorization code")]
    MissingAuthCode,

    /// A user record id that is not in the `table:key` form tokens carry
    #[error("malformed user record id: {0}")]
    MalformedRecordId(String),

    /// The database matched no row — the current password did not compare
    #[error("password change rejected")]
    PasswordChangeRejected,
}
