// Request-scoped session facade.
// One instance per request wires that request's cookies to an authenticated
// SurrealDB connection and exposes the handful of operations the route
// handlers need. Cookie mutations accumulate in the store and travel back
// to the HTTP layer via `into_cookies`.

use std::sync::Arc;

use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use crate::config::AuthConfig;
use crate::cookies::{CookieOptions, SessionCookies};
use crate::error::{Error, Result};
use crate::oauth::{CallbackState, GitHubOAuth};
use crate::{surreal, token};

/// The session facade. `C` is whatever cookie store the HTTP layer provides.
pub struct AuthSession<C: SessionCookies> {
    config: Arc<AuthConfig>,
    cookies: C,
}

impl<C: SessionCookies> AuthSession<C> {
    pub fn new(config: Arc<AuthConfig>, cookies: C) -> Self {
        Self { config, cookies }
    }

    /// The raw session token, if the request carried one
    pub fn token(&self) -> Option<String> {
        self.cookies.get(&self.config.session.cookie_name)
    }

    fn cookie_options(&self) -> CookieOptions {
        CookieOptions::session(self.config.session.max_age)
    }

    fn store_token(&mut self, token: &str) {
        let options = self.cookie_options();
        self.cookies
            .set(&self.config.session.cookie_name, token, &options);
    }

    /// Drop the session cookie. Nothing is revoked remotely — the token is
    /// opaque to this layer and expires on its own.
    pub fn logout(&mut self) {
        let options = self.cookie_options();
        self.cookies.remove(&self.config.session.cookie_name, &options);
    }

    /// Open a connection, authenticated with the session token when one is
    /// present. A token the database rejects is dropped from the cookies and
    /// the connection stays unauthenticated.
    pub async fn connect(&mut self) -> Result<Surreal<Any>> {
        let db = surreal::connect(&self.config.surreal).await?;

        match self.token() {
            Some(token) => {
                if let Err(err) = db.authenticate(token).await {
                    tracing::warn!(error = %err, "session token rejected, clearing cookie");
                    self.logout();
                }
            }
            None => {
                // No token, ensure logged out
                self.logout();
            }
        }

        Ok(db)
    }

    /// Password sign-in. On success the issued token becomes the new session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.logout();

        let db = self.connect().await?;
        let token = surreal::signin_password(&db, &self.config.surreal, email, password).await?;
        self.store_token(&token);

        tracing::info!("user signed in");
        Ok(())
    }

    /// Password sign-up. On success the issued token becomes the new session.
    pub async fn register(&mut self, email: &str, password: &str) -> Result<()> {
        self.logout();

        let db = self.connect().await?;
        let token = surreal::signup_password(&db, &self.config.surreal, email, password).await?;
        self.store_token(&token);

        tracing::info!("user registered");
        Ok(())
    }

    /// Authorization URL for the GitHub login form action
    pub fn github_login_url(&self, next: &str) -> Result<String> {
        let github = self
            .config
            .github
            .as_ref()
            .ok_or(Error::OAuthNotConfigured)?;

        Ok(GitHubOAuth::new(github).authorization_url(next))
    }

    /// Complete the GitHub authorization-code flow. Returns the destination
    /// path recovered from the callback state.
    pub async fn login_with_callback(
        &mut self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<String> {
        let github = self
            .config
            .github
            .as_ref()
            .ok_or(Error::OAuthNotConfigured)?
            .clone();
        let code = code.ok_or(Error::MissingAuthCode)?;
        let next = CallbackState::parse(state).next;

        self.logout();

        let db = self.connect().await?;
        let token = surreal::signin_github(
            &db,
            &self.config.surreal,
            code,
            &github.client_id,
            &github.client_secret,
        )
        .await?;
        self.store_token(&token);

        tracing::info!("user signed in via github");
        Ok(next)
    }

    /// Change the current user's password. The current password is verified
    /// inside the database; a mismatch surfaces as `PasswordChangeRejected`.
    pub async fn change_password(&mut self, current: &str, new: &str) -> Result<()> {
        let user_id = self.user_id().ok_or(Error::NotAuthenticated)?;

        let db = self.connect().await?;
        surreal::change_password(&db, &user_id, current, new).await?;

        tracing::info!("password changed");
        Ok(())
    }

    /// User id decoded from the session cookie. No I/O, no verification.
    pub fn user_id(&self) -> Option<String> {
        self.token().as_deref().and_then(token::user_id)
    }

    /// User id the database associates with this session. `None` when the
    /// connection is not authenticated.
    pub async fn user_info(&mut self) -> Result<Option<String>> {
        let db = self.connect().await?;
        surreal::current_user(&db).await
    }

    /// Log the remote `fn::github_debug` output for a code (development aid)
    pub async fn debug_github(&mut self, code: &str) -> Result<()> {
        let github = self
            .config
            .github
            .as_ref()
            .ok_or(Error::OAuthNotConfigured)?
            .clone();

        let db = self.connect().await?;
        surreal::debug_github(&db, code, &github.client_id, &github.client_secret).await
    }

    /// Hand the cookie store back to the HTTP layer
    pub fn into_cookies(self) -> C {
        self.cookies
    }
}
