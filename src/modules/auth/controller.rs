use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use rollcall_auth::AuthError;
use rollcall_core::{AppError, ErrorResponse};
use rollcall_models::{
    LoginRequest, LoginResponse, MessageResponse, SessionResponse, SessionStatusResponse,
};
use tracing::instrument;

use crate::middleware::auth::{AuthContext, extract_candidate_token};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive a session token
///
/// The token is returned in the body and set as an `HttpOnly` cookie; either
/// can be presented on later requests.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 503, description = "Session cache unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_type = %dto.user_type))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let issued = state
        .issuer
        .login(dto.user_type, &dto.user_id, &dto.password)
        .await?;

    let cookie = state
        .cookie_config
        .session_cookie(&issued.token, state.issuer.jwt_config().token_lifetime);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse::from(issued)),
    )
        .into_response())
}

/// End the current session
///
/// The presented token stops working immediately and the session cookie is
/// cleared.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorResponse),
        (status = 503, description = "Session cache unavailable", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip_all, fields(user_id = %context.user_id, user_type = %context.user_type))]
pub async fn logout_user(
    State(state): State<AppState>,
    context: AuthContext,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = extract_candidate_token(&headers, &state.cookie_config.name)?
        .ok_or(AuthError::MissingToken)?;

    state.issuer.logout(&token).await?;

    Ok((
        [(header::SET_COOKIE, state.cookie_config.clearing_cookie())],
        Json(MessageResponse::new("Logged out successfully")),
    )
        .into_response())
}

/// Get the current session
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "Missing, invalid, expired or revoked token", body = ErrorResponse),
        (status = 503, description = "Session cache unavailable", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
pub async fn get_current_session(context: AuthContext) -> Json<SessionResponse> {
    Json(SessionResponse::from(&context.claims))
}

/// Report whether the request is authenticated
///
/// Anonymous requests succeed with `authenticated: false`; a request that
/// presents a bad token is still rejected.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session status", body = SessionStatusResponse),
        (status = 401, description = "Presented token is malformed, invalid, expired or revoked", body = ErrorResponse),
        (status = 503, description = "Session cache unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn get_session_status(context: Option<AuthContext>) -> Json<SessionStatusResponse> {
    Json(match context {
        Some(context) => SessionStatusResponse::authenticated(&context.claims),
        None => SessionStatusResponse::anonymous(),
    })
}
