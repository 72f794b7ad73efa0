// Gatekit session facade
//
// This crate is the authentication core for a web app whose credential
// verification lives inside SurrealDB: record accesses hash and check
// passwords, mint the session tokens, and run the GitHub code exchange.
// What remains here is the thin glue the original server hook provided —
// a request-scoped facade that wires cookies to an authenticated
// connection and exposes login/register/logout/password-change on top.
//
// Key design decisions:
// - Cookies are reached only through the SessionCookies trait, so the
//   facade works under any HTTP layer (the server crate adapts axum's jar)
// - Session tokens are decoded but never verified locally; the database
//   re-checks them on every authenticated connection
// - Every operation opens a fresh connection, like the original's
//   per-request flow — no pooling, caching, or retry

pub mod config;
pub mod cookies;
pub mod error;
pub mod oauth;
pub mod session;
pub mod surreal;
pub mod token;

// Re-exports for convenience
pub use config::{AuthConfig, GitHubOAuthConfig, SessionConfig, SurrealConfig};
pub use error::{Error, Result};
pub use session::AuthSession;
