// SurrealDB connection and record-access helpers.
// The database owns credential verification, password hashing, and the
// GitHub code exchange (inside its `user` and `github` access definitions);
// this module forwards parameters and relays the issued tokens.

use serde::{Deserialize, Serialize};
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Record;
use surrealdb::{RecordId, Surreal};

use crate::config::SurrealConfig;
use crate::error::{Error, Result};

/// Record access definitions the remote database exposes
const PASSWORD_ACCESS: &str = "user";
const GITHUB_ACCESS: &str = "github";

/// Parameters for the password access (`$email` / `$password` in the
/// remote SIGNIN/SIGNUP expressions)
#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Parameters for the github access; the names are what the remote access
/// logic expects, not this crate's choice
#[derive(Debug, Serialize)]
struct GitHubCredentials<'a> {
    code: &'a str,
    github_client_id: &'a str,
    github_secret_id: &'a str,
}

/// Row shape returned by the password-change update
#[derive(Debug, Deserialize)]
pub struct UserRecord {
    pub id: RecordId,
    pub email: Option<String>,
}

/// Open a fresh connection and select the configured namespace and database
pub async fn connect(config: &SurrealConfig) -> Result<Surreal<Any>> {
    let db = any::connect(config.endpoint.as_str()).await?;
    db.use_ns(config.namespace.as_str())
        .use_db(config.database.as_str())
        .await?;
    Ok(db)
}

/// Sign in through the password access. Returns the token the database issued.
pub async fn signin_password(
    db: &Surreal<Any>,
    config: &SurrealConfig,
    email: &str,
    password: &str,
) -> Result<String> {
    let jwt = db
        .signin(Record {
            namespace: &config.namespace,
            database: &config.database,
            access: PASSWORD_ACCESS,
            params: PasswordCredentials { email, password },
        })
        .await?;

    Ok(jwt.into_insecure_token())
}

/// Create an account through the password access. Returns the issued token.
pub async fn signup_password(
    db: &Surreal<Any>,
    config: &SurrealConfig,
    email: &str,
    password: &str,
) -> Result<String> {
    let jwt = db
        .signup(Record {
            namespace: &config.namespace,
            database: &config.database,
            access: PASSWORD_ACCESS,
            params: PasswordCredentials { email, password },
        })
        .await?;

    Ok(jwt.into_insecure_token())
}

/// Sign in through the github access with an authorization code. The code
/// exchange against GitHub happens inside the access logic.
pub async fn signin_github(
    db: &Surreal<Any>,
    config: &SurrealConfig,
    code: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String> {
    let jwt = db
        .signin(Record {
            namespace: &config.namespace,
            database: &config.database,
            access: GITHUB_ACCESS,
            params: GitHubCredentials {
                code,
                github_client_id: client_id,
                github_secret_id: client_secret,
            },
        })
        .await?;

    Ok(jwt.into_insecure_token())
}

/// Change the password of `user_id`, with the current password verified
/// inside the database. Zero updated rows means the current password did
/// not match.
pub async fn change_password(
    db: &Surreal<Any>,
    user_id: &str,
    current_password: &str,
    new_password: &str,
) -> Result<UserRecord> {
    let id = parse_record_id(user_id)?;

    let mut response = db
        .query(
            "UPDATE $id \
             SET password = crypto::argon2::generate($new) \
             WHERE crypto::argon2::compare(password, $old)",
        )
        .bind(("id", id))
        .bind(("old", current_password.to_string()))
        .bind(("new", new_password.to_string()))
        .await?;

    let updated: Option<UserRecord> = response.take(0)?;
    updated.ok_or(Error::PasswordChangeRejected)
}

/// Record id of the user the connection is authenticated as
pub async fn current_user(db: &Surreal<Any>) -> Result<Option<String>> {
    let mut response = db.query("RETURN $auth").await?;
    let id: Option<RecordId> = response.take(0)?;
    Ok(id.map(|id| id.to_string()))
}

/// Run the remote `fn::github_debug` helper and log its output (development aid)
pub async fn debug_github(
    db: &Surreal<Any>,
    code: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<()> {
    let mut response = db
        .query("RETURN fn::github_debug($code, $github_client_id, $github_secret_id)")
        .bind(("code", code.to_string()))
        .bind(("github_client_id", client_id.to_string()))
        .bind(("github_secret_id", client_secret.to_string()))
        .await?;

    let result: Option<serde_json::Value> = response.take(0)?;
    tracing::debug!(?result, "github debug response");
    Ok(())
}

/// Parse the `table:key` form SurrealDB renders in token claims
fn parse_record_id(raw: &str) -> Result<RecordId> {
    match raw.split_once(':') {
        Some((table, key)) if !table.is_empty() && !key.is_empty() => {
            Ok(RecordId::from_table_key(table, key))
        }
        _ => Err(Error::MalformedRecordId(raw.to_string())),
    }
}
