// Cookie seam between the session facade and whatever HTTP layer hosts it.
// The facade never touches request or response types — only this trait,
// the way the original received injected get/set callbacks.

use std::collections::HashMap;
use std::time::Duration;

/// `SameSite` cookie attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Attributes applied when writing a cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: String,
    pub max_age: Option<Duration>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            max_age: None,
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
        }
    }
}

impl CookieOptions {
    /// Options for the session token cookie
    pub fn session(max_age: Duration) -> Self {
        Self {
            max_age: Some(max_age),
            ..Self::default()
        }
    }
}

/// Cookie access as the facade sees it
pub trait SessionCookies {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str, options: &CookieOptions);
    fn remove(&mut self, name: &str, options: &CookieOptions);
}

/// Map-backed cookie store for tests and non-HTTP callers
#[derive(Debug, Default)]
pub struct MemoryCookies {
    values: HashMap<String, String>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a single cookie
    pub fn with(name: &str, value: &str) -> Self {
        let mut cookies = Self::new();
        cookies.values.insert(name.to_string(), value.to_string());
        cookies
    }
}

impl SessionCookies for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str, _options: &CookieOptions) {
        self.values.insert(name.to_string(), value.to_string());
    }

    fn remove(&mut self, name: &str, _options: &CookieOptions) {
        self.values.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_options() {
        let options = CookieOptions::session(Duration::from_secs(1800));
        assert_eq!(options.path, "/");
        assert_eq!(options.max_age, Some(Duration::from_secs(1800)));
        assert!(options.secure);
        assert!(options.http_only);
        assert_eq!(options.same_site, SameSite::Strict);
    }

    #[test]
    fn test_memory_cookies_roundtrip() {
        let options = CookieOptions::default();
        let mut cookies = MemoryCookies::new();

        assert_eq!(cookies.get("token"), None);

        cookies.set("token", "abc", &options);
        assert_eq!(cookies.get("token"), Some("abc".to_string()));

        cookies.remove("token", &options);
        assert_eq!(cookies.get("token"), None);
    }

    #[test]
    fn test_memory_cookies_seeded() {
        let cookies = MemoryCookies::with("token", "abc");
        assert_eq!(cookies.get("token"), Some("abc".to_string()));
        assert_eq!(cookies.get("other"), None);
    }
}
