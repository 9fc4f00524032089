use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{get_current_session, get_session_status, login_user, logout_user};
use crate::middleware::auth::{optional_auth, require_auth};
use crate::state::AppState;

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/logout", post(logout_user))
        .route("/me", get(get_current_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let optional = Router::new()
        .route("/session", get(get_session_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    Router::new()
        .route("/login", post(login_user))
        .merge(authenticated)
        .merge(optional)
}
