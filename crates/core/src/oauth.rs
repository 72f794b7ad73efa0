// GitHub OAuth authorization URLs and callback state.
// Decision: the `state` parameter carries the post-login destination as a
// small JSON object; the provider round-trips it to the callback untouched

use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::config::GitHubOAuthConfig;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

/// Scopes requested on every login
const BASE_SCOPES: [&str; 2] = ["read:user", "user:email"];

/// State round-tripped through the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackState {
    /// Path to land on after the callback completes
    pub next: String,
    /// Identity provider that initiated the flow
    pub provider: String,
}

impl CallbackState {
    pub fn github(next: &str) -> Self {
        Self {
            next: next.to_string(),
            provider: "github".to_string(),
        }
    }

    /// Parse the `state` query parameter. Lenient: a missing or malformed
    /// value falls back to a `/` destination.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|state| serde_json::from_str(state).ok())
            .unwrap_or_else(|| Self::github("/"))
    }
}

/// GitHub authorization-URL builder
#[derive(Debug, Clone)]
pub struct GitHubOAuth<'a> {
    config: &'a GitHubOAuthConfig,
}

impl<'a> GitHubOAuth<'a> {
    pub fn new(config: &'a GitHubOAuthConfig) -> Self {
        Self { config }
    }

    /// Authorization URL for a login redirect, with `next` carried in state
    pub fn authorization_url(&self, next: &str) -> String {
        self.authorization_url_with(next, &[], &[])
    }

    /// Authorization URL with custom parameters (e.g. `login`, `allow_signup`)
    /// and scopes beyond the defaults
    pub fn authorization_url_with(
        &self,
        next: &str,
        custom_params: &[(&str, &str)],
        extra_scopes: &[&str],
    ) -> String {
        let mut scopes: Vec<&str> = BASE_SCOPES.to_vec();
        scopes.extend_from_slice(extra_scopes);

        let state = json!({
            "next": next,
            "provider": "github",
        })
        .to_string();

        let mut url = Url::parse(AUTHORIZE_URL).expect("static authorize endpoint parses");
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.config.client_id);
            query.append_pair("redirect_uri", &self.config.redirect_uri);
            query.append_pair("scope", &scopes.join(" "));
            query.append_pair("state", &state);
            for (name, value) in custom_params {
                query.append_pair(name, value);
            }
        }

        url.to_string()
    }
}
