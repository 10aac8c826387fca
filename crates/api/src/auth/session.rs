//! Session cookie configuration, parsing and `Set-Cookie` formatting.
//!
//! The cookie carries an opaque key from
//! [`forest_core::session_keys::generate_session_key`]; the server looks the
//! session up by the key's SHA-256 digest.

use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use forest_core::types::Timestamp;

/// Default cookie name.
const DEFAULT_COOKIE_NAME: &str = "sessionid";
/// Default session lifetime in days.
const DEFAULT_TTL_DAYS: i64 = 14;

/// Configuration for browser session cookies.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cookie name carrying the session key.
    pub cookie_name: String,
    /// Session lifetime in days; also used as the cookie `Max-Age`.
    pub ttl_days: i64,
    /// Whether to mark the cookie `Secure` (HTTPS only).
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            ttl_days: DEFAULT_TTL_DAYS,
            secure: false,
        }
    }
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Default     |
    /// |-------------------------|-------------|
    /// | `SESSION_COOKIE_NAME`   | `sessionid` |
    /// | `SESSION_TTL_DAYS`      | `14`        |
    /// | `SESSION_COOKIE_SECURE` | `false`     |
    pub fn from_env() -> Self {
        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.into());
        assert!(
            !cookie_name.is_empty()
                && cookie_name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "SESSION_COOKIE_NAME must be a non-empty alphanumeric token"
        );

        let ttl_days: i64 = std::env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_TTL_DAYS.to_string())
            .parse()
            .expect("SESSION_TTL_DAYS must be a valid i64");

        let secure: bool = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be true or false");

        Self {
            cookie_name,
            ttl_days,
            secure,
        }
    }

    /// Expiry timestamp for a session created now.
    pub fn expires_at(&self) -> Timestamp {
        chrono::Utc::now() + chrono::Duration::days(self.ttl_days)
    }

    /// Extract the session key from the request's `Cookie` headers.
    pub fn read_key(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
    }

    /// `Set-Cookie` value handing `key` to the browser.
    pub fn issue_cookie(&self, key: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        self.build_cookie(key, self.ttl_days * 24 * 60 * 60)
    }

    /// `Set-Cookie` value instructing the browser to drop the session.
    pub fn clear_cookie(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        self.build_cookie("", 0)
    }

    fn build_cookie(
        &self,
        value: &str,
        max_age_secs: i64,
    ) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut parts = vec![
            format!("{}={}", self.cookie_name, value),
            "Path=/".to_string(),
            "HttpOnly".to_string(),
            "SameSite=Lax".to_string(),
        ];
        if self.secure {
            parts.push("Secure".to_string());
        }
        parts.push(format!("Max-Age={max_age_secs}"));

        HeaderValue::from_str(&parts.join("; "))
    }
}
