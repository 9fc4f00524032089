//! Role-based authorization middleware.
//!
//! Gates never look at tokens. They read the [`AuthContext`] that
//! `require_auth` left in the request extensions, so they must be layered
//! inside it:
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::{auth::require_auth, role::require_admin};
//!
//! let admin_routes = Router::new()
//!     .route("/", get(list_admins))
//!     .route_layer(middleware::from_fn(require_admin))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use rollcall_auth::{AuthError, UserType};
use tracing::warn;

use crate::middleware::auth::AuthContext;

/// Lets the request through when the caller's role is in `allowed_roles`.
pub async fn require_roles(
    req: Request,
    next: Next,
    allowed_roles: &[UserType],
) -> Result<Response, AuthError> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .ok_or(AuthError::AuthenticationRequired)?;

    if let Err(e) = check_any_role(context, allowed_roles) {
        warn!(
            user_id = %context.user_id,
            user_type = %context.user_type,
            path = %req.uri().path(),
            "Role not allowed"
        );
        return Err(e);
    }

    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Response {
    gate(req, next, &[UserType::Admin]).await
}

pub async fn require_teacher(req: Request, next: Next) -> Response {
    gate(req, next, &[UserType::Teacher]).await
}

pub async fn require_student(req: Request, next: Next) -> Response {
    gate(req, next, &[UserType::Student]).await
}

/// Admins and teachers.
pub async fn require_staff(req: Request, next: Next) -> Response {
    gate(req, next, &[UserType::Admin, UserType::Teacher]).await
}

async fn gate(req: Request, next: Next, allowed_roles: &[UserType]) -> Response {
    match require_roles(req, next, allowed_roles).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Check that the caller has exactly `role`, for use inside handlers.
pub fn check_role(context: &AuthContext, role: UserType) -> Result<(), AuthError> {
    check_any_role(context, &[role])
}

/// Check that the caller has one of `roles`, for use inside handlers.
pub fn check_any_role(context: &AuthContext, roles: &[UserType]) -> Result<(), AuthError> {
    if roles.contains(&context.user_type) {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermissions)
    }
}
