//! Middleware for request authentication and role authorization.
//!
//! - [`auth`]: token extraction, `require_auth` / `optional_auth` and the
//!   [`auth::AuthContext`] extractor
//! - [`role`]: role gates that read the context placed by `auth`
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>` or the session cookie
//! 2. `require_auth` validates the token against the session cache
//! 3. A role gate, when present, checks the caller's `user_type`
//! 4. Handler reads [`auth::AuthContext`]
//!
//! # Example
//!
//! ```ignore
//! use axum::middleware;
//! use crate::middleware::{auth::require_auth, role::require_admin};
//!
//! let admin_routes = Router::new()
//!     .route("/", get(list_admins))
//!     .route_layer(middleware::from_fn(require_admin))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

pub mod auth;
pub mod role;
