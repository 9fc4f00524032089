use std::env;

use crate::env_or;

/// Session cookie settings.
///
/// # Environment Variables
///
/// - `AUTH_COOKIE_NAME`: cookie carrying the session token (default: `auth_token`)
/// - `AUTH_COOKIE_SECURE`: emit the `Secure` attribute (default: `true`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            name: env::var("AUTH_COOKIE_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "auth_token".to_string()),
            secure: env_or("AUTH_COOKIE_SECURE", true),
        }
    }

    /// `Set-Cookie` value carrying `token` for `max_age` seconds.
    pub fn session_cookie(&self, token: &str, max_age: i64) -> String {
        format!(
            "{}={}; Path=/; HttpOnly;{} SameSite=Strict; Max-Age={}",
            self.name,
            token,
            if self.secure { " Secure;" } else { "" },
            max_age.max(0)
        )
    }

    /// `Set-Cookie` value that removes the session cookie.
    pub fn clearing_cookie(&self) -> String {
        self.session_cookie("", 0)
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "auth_token".to_string(),
            secure: true,
        }
    }
}
