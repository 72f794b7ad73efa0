// Authentication configuration loaded from environment variables.
// Decision: SurrealDB settings are required — the gateway is useless without them
// Decision: GitHub OAuth is optional as a pair; a half-configured pair counts as absent

use std::time::Duration;

use crate::error::{Error, Result};

/// SurrealDB connection settings
#[derive(Debug, Clone)]
pub struct SurrealConfig {
    /// Endpoint URL, e.g. `ws://localhost:8000` or `http://db.internal:8000`
    pub endpoint: String,
    /// Namespace to select after connecting
    pub namespace: String,
    /// Database to select after connecting
    pub database: String,
}

/// GitHub OAuth provider configuration
#[derive(Debug, Clone)]
pub struct GitHubOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Callback URL registered with the OAuth app
    pub redirect_uri: String,
}

/// Session cookie configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the cookie holding the SurrealDB-issued token
    pub cookie_name: String,
    /// Session cookie lifetime
    pub max_age: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "surreal_token".to_string(),
            max_age: Duration::from_secs(30 * 60), // 30 minutes
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Remote database settings
    pub surreal: SurrealConfig,
    /// GitHub OAuth configuration
    pub github: Option<GitHubOAuthConfig>,
    /// Session cookie settings
    pub session: SessionConfig,
    /// Base URL for OAuth callbacks
    pub base_url: String,
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let surreal = SurrealConfig {
            endpoint: require_env("SURREALDB_URL")?,
            namespace: require_env("SURREALDB_NAMESPACE")?,
            database: require_env("SURREALDB_DATABASE")?,
        };

        let base_url = std::env::var("AUTH_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        // GitHub OAuth configuration
        let github = match (
            std::env::var("AUTH_GITHUB_CLIENT_ID"),
            std::env::var("AUTH_GITHUB_CLIENT_SECRET"),
        ) {
            (Ok(client_id), Ok(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                let redirect_uri = std::env::var("AUTH_GITHUB_REDIRECT_URI")
                    .unwrap_or_else(|_| format!("{}/auth/callback", base_url));
                Some(GitHubOAuthConfig {
                    client_id,
                    client_secret,
                    redirect_uri,
                })
            }
            _ => None,
        };

        let mut session = SessionConfig::default();
        if let Ok(name) = std::env::var("AUTH_SESSION_COOKIE") {
            if !name.is_empty() {
                session.cookie_name = name;
            }
        }
        if let Some(secs) = std::env::var("AUTH_SESSION_MAX_AGE")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            session.max_age = Duration::from_secs(secs);
        }

        Ok(Self {
            surreal,
            github,
            session,
            base_url,
        })
    }

    /// Check if GitHub OAuth is available
    pub fn oauth_enabled(&self) -> bool {
        self.github.is_some()
    }
}

fn require_env(key: &'static str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingConfig(key)),
    }
}
