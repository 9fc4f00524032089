//! # Rollcall Config
//!
//! Configuration types for the Rollcall API.
//!
//! Every structure is loaded from environment variables with sane defaults
//! and is injected explicitly into the components that need it:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cookie`]: session cookie name and flags
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: bind address and request timeout
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::{CookieConfig, CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cookie_config = CookieConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
