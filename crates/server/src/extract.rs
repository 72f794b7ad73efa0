// Per-request session construction.
// The `SurrealSession` extractor plays the role the original's server hook
// did: every handler that asks for it gets the facade wired to the
// request's cookies. Handlers finish by turning the session back into a
// jar so cookie mutations reach the response.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite as JarSameSite};

use gatekit_core::cookies::{CookieOptions, SameSite, SessionCookies};
use gatekit_core::AuthSession;

use crate::state::AppState;

/// `SessionCookies` over an axum-extra `CookieJar`
pub struct JarCookies {
    jar: CookieJar,
}

impl JarCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
        }
    }

    /// The jar with all accumulated mutations, ready to return from a handler
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn build_cookie(name: &str, value: &str, options: &CookieOptions) -> Cookie<'static> {
        let mut builder = Cookie::build((name.to_string(), value.to_string()))
            .path(options.path.clone())
            .http_only(options.http_only)
            .secure(options.secure)
            .same_site(match options.same_site {
                SameSite::Strict => JarSameSite::Strict,
                SameSite::Lax => JarSameSite::Lax,
                SameSite::None => JarSameSite::None,
            });
        if let Some(max_age) = options.max_age {
            builder = builder.max_age(time::Duration::seconds(max_age.as_secs() as i64));
        }
        builder.build()
    }
}

impl SessionCookies for JarCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|cookie| cookie.value().to_string())
    }

    fn set(&mut self, name: &str, value: &str, options: &CookieOptions) {
        self.jar = self.jar.clone().add(Self::build_cookie(name, value, options));
    }

    fn remove(&mut self, name: &str, options: &CookieOptions) {
        self.jar = self
            .jar
            .clone()
            .remove(Cookie::build(name.to_string()).path(options.path.clone()));
    }
}

/// Extractor handing each handler a session facade over the request cookies
pub struct SurrealSession(pub AuthSession<JarCookies>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SurrealSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let cookies = JarCookies::from_headers(&parts.headers);

        Ok(SurrealSession(AuthSession::new(
            app_state.config.clone(),
            cookies,
        )))
    }
}
