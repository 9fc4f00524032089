use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use rollcall_auth::{AuthError, Claims, TokenIssuer, UserType};
use tracing::debug;

use crate::state::AppState;

/// Identity of the caller, placed in request extensions by the auth
/// middleware and dropped with the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub user_type: UserType,
    pub claims: Claims,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            user_type: claims.user_type,
            claims,
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::AuthenticationRequired)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthContext>().cloned())
    }
}

/// Parses `Bearer <token>`. The scheme is case-insensitive and exactly one
/// non-empty token must follow it.
fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return None;
    }
    Some(token)
}

/// Picks the token a request presents.
///
/// The `Authorization` header wins when present, even if it is malformed;
/// the session cookie is consulted only without one. An empty cookie counts
/// as absent. `Ok(None)` means no token was sent at all.
pub fn extract_candidate_token(
    headers: &HeaderMap,
    cookie_name: &str,
) -> Result<Option<String>, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value.to_str().map_err(|_| AuthError::MalformedToken)?;
        return bearer_token(value)
            .map(|token| Some(token.to_string()))
            .ok_or(AuthError::MalformedToken);
    }

    let jar = CookieJar::from_headers(headers);
    Ok(jar
        .get(cookie_name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(str::to_string))
}

async fn authenticate(issuer: &TokenIssuer, token: &str) -> Result<AuthContext, AuthError> {
    let claims = issuer.validate(token).await?;
    Ok(AuthContext::from(claims))
}

/// Rejects the request unless it carries a valid, current session token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_candidate_token(req.headers(), &state.cookie_config.name)?
        .ok_or(AuthError::MissingToken)?;

    let context = authenticate(&state.issuer, &token).await.inspect_err(|e| {
        debug!(code = e.code(), "Request authentication failed");
    })?;

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Lets anonymous requests through. A request that does present a token is
/// validated exactly like under [`require_auth`].
pub async fn optional_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if let Some(token) = extract_candidate_token(req.headers(), &state.cookie_config.name)? {
        let context = authenticate(&state.issuer, &token).await?;
        req.extensions_mut().insert(context);
    }

    Ok(next.run(req).await)
}
