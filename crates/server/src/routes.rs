// Authentication HTTP routes.
// Decision: handlers mirror the original form actions — 303 redirects on
// success, cookie mutations carried on the returned jar
// Decision: statuses stay where the original pinned them (register fails
// with 500, the callback with 400)

use axum::extract::Query;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::SurrealSession;
use crate::state::AppState;
use crate::validation::{validate_email, validate_password};

/// Login form. The field is named `username` for compatibility with the
/// original login form; it is forwarded as the `email` access parameter.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
}

/// GitHub login form action
#[derive(Debug, Deserialize)]
pub struct GitHubLoginForm {
    /// Path to land on after the callback (default `/`)
    #[serde(default)]
    pub next: Option<String>,
}

/// Password-change form (field names match the original form)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
}

/// OAuth callback query parameters
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Session info response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: Option<String>,
}

/// Password-change response
#[derive(Debug, Serialize)]
pub struct PasswordChangeResponse {
    pub success: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Create the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Form actions
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/login/github", post(github_login))
        .route("/register", post(register))
        .route("/password", get(password_page).post(change_password))
        // OAuth callback
        .route("/auth/callback", get(oauth_callback))
        // Session-derived page data
        .route("/session", get(session_info))
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

/// GET /health - liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /login - password sign-in form action
async fn login(
    SurrealSession(mut session): SurrealSession,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    session
        .login(&form.username, &form.password)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "login rejected");
            ApiError::unauthorized(err.to_string())
        })?;

    Ok((session.into_cookies().into_jar(), Redirect::to("/")))
}

/// POST /logout - drop the session cookie
async fn logout(SurrealSession(mut session): SurrealSession) -> (CookieJar, Redirect) {
    session.logout();
    (session.into_cookies().into_jar(), Redirect::to("/"))
}

/// POST /login/github - redirect to the GitHub authorization page
async fn github_login(
    SurrealSession(session): SurrealSession,
    Form(form): Form<GitHubLoginForm>,
) -> Result<Redirect, ApiError> {
    let next = form.next.as_deref().unwrap_or("/");
    let url = session.github_login_url(next)?;

    Ok(Redirect::to(&url))
}

/// POST /register - password sign-up form action
async fn register(
    SurrealSession(mut session): SurrealSession,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    validate_email(&form.email)?;
    validate_password(&form.password)?;

    session
        .register(&form.email, &form.password)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "registration failed");
            ApiError::internal(err.to_string())
        })?;

    Ok((session.into_cookies().into_jar(), Redirect::to("/")))
}

/// GET /auth/callback - complete the GitHub authorization-code flow
async fn oauth_callback(
    SurrealSession(mut session): SurrealSession,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let next = session
        .login_with_callback(query.code.as_deref(), query.state.as_deref())
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "github callback rejected");
            ApiError::bad_request(err.to_string())
        })?;

    Ok((session.into_cookies().into_jar(), Redirect::to(&next)))
}

/// GET /password - session-guarded page data, with the session verified
/// against the database rather than the cookie alone
async fn password_page(SurrealSession(mut session): SurrealSession) -> Response {
    match session.user_info().await {
        Ok(Some(user_id)) => Json(SessionResponse {
            user_id: Some(user_id),
        })
        .into_response(),
        Ok(None) => Redirect::to("/login").into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "session lookup failed");
            Redirect::to("/login").into_response()
        }
    }
}

/// POST /password - change the current user's password
async fn change_password(
    SurrealSession(mut session): SurrealSession,
    Form(form): Form<PasswordForm>,
) -> Result<Json<PasswordChangeResponse>, ApiError> {
    validate_password(&form.new_password)?;

    session
        .change_password(&form.old_password, &form.new_password)
        .await?;

    Ok(Json(PasswordChangeResponse { success: true }))
}

/// GET /session - user id decoded from the session cookie (no database call)
async fn session_info(SurrealSession(session): SurrealSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: session.user_id(),
    })
}

/// GET /dashboard - session-guarded page data
async fn dashboard(SurrealSession(session): SurrealSession) -> Response {
    match session.user_id() {
        Some(user_id) => Json(SessionResponse {
            user_id: Some(user_id),
        })
        .into_response(),
        None => Redirect::to("/login").into_response(),
    }
}
