use std::env;
use std::time::Duration;

use crate::env_or;

/// HTTP server settings.
///
/// # Environment Variables
///
/// - `BIND_ADDRESS`: listen address (default: `0.0.0.0:3000`)
/// - `REQUEST_TIMEOUT_SECS`: upper bound for a whole request (default: `30`)
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            request_timeout: Duration::from_secs(env_or("REQUEST_TIMEOUT_SECS", 30)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}
