// Session token decoding.
// The cookie value is a JWT issued by SurrealDB's record access. It is
// decoded but never verified here: it comes back out of an HttpOnly cookie
// this service set itself, and the database re-checks the signature on
// every authenticated connection.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims SurrealDB places in record-access tokens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Authenticated record id, e.g. `user:l9y27kbkdjhbdrq1uyan`
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Namespace the token was issued for
    #[serde(rename = "NS", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Database the token was issued for
    #[serde(rename = "DB", skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Record access the token was issued through
    #[serde(rename = "AC", skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

/// Decode the payload of a session token without verifying its signature.
/// Lenient: anything malformed decodes to `None`.
pub fn decode_claims(token: &str) -> Option<SessionClaims> {
    // SurrealDB signs record-access tokens with whichever HMAC algorithm the
    // access definition declares; accept any of them.
    let mut validation = Validation::new(Algorithm::HS512);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

/// Record id of the authenticated user, if the token carries one
pub fn user_id(token: &str) -> Option<String> {
    decode_claims(token).and_then(|claims| claims.id)
}

/// Whether the token is past its expiry (tokens without `exp` count as expired)
pub fn is_expired(token: &str) -> bool {
    match decode_claims(token).and_then(|claims| claims.exp) {
        Some(exp) => exp < Utc::now().timestamp(),
        None => true,
    }
}
