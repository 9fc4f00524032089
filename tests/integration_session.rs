mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use common::{
    ADMIN_EMAIL, ADMIN_ID, PASSWORD, STUDENT_ID, TEACHER_ID, setup_test_app, setup_test_app_with,
    test_jwt_config,
};
use rollcall_auth::{
    InMemoryCredentialStore, SessionCache, UserType, create_token_at, session_key,
};
use rollcall_config::JwtConfig;

#[tokio::test]
async fn test_expired_token_is_rejected_and_evicted() {
    let app = setup_test_app().await;
    let issued_at = Utc::now().timestamp() - 7200;
    let issued = create_token_at(ADMIN_ID, UserType::Admin, issued_at, &test_jwt_config()).unwrap();
    let key = session_key(UserType::Admin, ADMIN_ID);

    // Entry outlived its token, as after a clock skew between cache and app.
    app.cache
        .put(&key, &issued.token, Duration::from_secs(60))
        .await
        .unwrap();

    let first = app.get_with_bearer("/api/auth/me", &issued.token).await;
    assert_eq!(first.status, StatusCode::UNAUTHORIZED);
    assert_eq!(first.translate_key(), "auth.token_expired");
    assert!(app.cache.get(&key).await.unwrap().is_none());

    let second = app.get_with_bearer("/api/auth/me", &issued.token).await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.translate_key(), "auth.revoked_token");
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let app = setup_test_app().await;
    let issued = create_token_at(
        TEACHER_ID,
        UserType::Teacher,
        Utc::now().timestamp(),
        &test_jwt_config(),
    )
    .unwrap();

    // Correctly signed but never recorded, as after a cache restart.
    let response = app.get_with_cookie("/api/auth/me", &issued.token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.translate_key(), "auth.revoked_token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret() {
    let app = setup_test_app().await;
    let other = JwtConfig {
        secret: "another-secret-key-at-least-32-characters".to_string(),
        token_lifetime: 3600,
    };
    let forged = create_token_at(ADMIN_ID, UserType::Admin, Utc::now().timestamp(), &other).unwrap();

    let response = app.get_with_bearer("/api/admins", &forged.token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.translate_key(), "auth.invalid_token");
}

#[tokio::test]
async fn test_garbage_token() {
    let app = setup_test_app().await;

    let response = app.get_with_bearer("/api/auth/me", "not-a-jwt").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.translate_key(), "auth.invalid_token");
}

#[tokio::test]
async fn test_malformed_authorization_headers() {
    let app = setup_test_app().await;

    for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer a b", "token"] {
        let request = Request::builder()
            .uri("/api/auth/me")
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{value}");
        assert_eq!(response.translate_key(), "auth.malformed_token", "{value}");
    }
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_is_accepted() {
    let app = setup_test_app().await;
    let token = app.login_token(UserType::Student, STUDENT_ID).await;

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, format!("bearer {}", token))
        .body(Body::empty())
        .unwrap();

    assert_eq!(app.send(request).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_header_takes_precedence_over_cookie() {
    let app = setup_test_app().await;
    let token = app.login_token(UserType::Teacher, TEACHER_ID).await;

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .header(header::COOKIE, format!("auth_token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.translate_key(), "auth.invalid_token");
}

#[tokio::test]
async fn test_empty_cookie_counts_as_missing() {
    let app = setup_test_app().await;

    let response = app.get_with_cookie("/api/auth/me", "").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.translate_key(), "auth.missing_token");
}

#[tokio::test]
async fn test_cache_outage_fails_closed() {
    let app = setup_test_app().await;
    let token = app.login_token(UserType::Admin, ADMIN_EMAIL).await;

    app.cache.set_unavailable(true);

    let request = app.get_with_bearer("/api/admins", &token).await;
    assert_eq!(request.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(request.translate_key(), "service_unavailable");
    assert_eq!(request.body["error"], "Service temporarily unavailable");

    let login = app.login(UserType::Admin, ADMIN_EMAIL, PASSWORD).await;
    assert_eq!(login.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(login.set_cookie().is_none());

    app.cache.set_unavailable(false);
    assert_eq!(
        app.get_with_bearer("/api/admins", &token).await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_optional_auth_allows_anonymous() {
    let app = setup_test_app().await;

    let response = app.get_anonymous("/api/auth/session").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "authenticated": false }));
}

#[tokio::test]
async fn test_optional_auth_still_rejects_bad_tokens() {
    let app = setup_test_app().await;

    let request = Request::builder()
        .uri("/api/auth/session")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let malformed = app.send(request).await;
    assert_eq!(malformed.status, StatusCode::UNAUTHORIZED);
    assert_eq!(malformed.translate_key(), "auth.malformed_token");

    let token = app.login_token(UserType::Student, STUDENT_ID).await;
    app.logout_with_bearer(&token).await;
    let revoked = app.get_with_bearer("/api/auth/session", &token).await;
    assert_eq!(revoked.status, StatusCode::UNAUTHORIZED);
    assert_eq!(revoked.translate_key(), "auth.revoked_token");
}

#[tokio::test]
async fn test_last_login_failure_does_not_fail_login() {
    let app = setup_test_app_with(InMemoryCredentialStore::with_failing_touch()).await;

    let response = app.login(UserType::Teacher, TEACHER_ID, PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.teachers.login_count(TEACHER_ID).await, 0);
}

#[tokio::test]
async fn test_me_reports_token_lifetime() {
    let app = setup_test_app().await;
    let token = app.login_token(UserType::Teacher, TEACHER_ID).await;

    let response = app.get_with_bearer("/api/auth/me", &token).await;

    let issued_at = chrono::DateTime::parse_from_rfc3339(response.body["issued_at"].as_str().unwrap())
        .unwrap();
    let expires_at =
        chrono::DateTime::parse_from_rfc3339(response.body["expires_at"].as_str().unwrap())
            .unwrap();
    assert_eq!((expires_at - issued_at).num_seconds(), 3600);
}

#[tokio::test]
async fn test_wildcard_origin_does_not_break_router() {
    let app = setup_test_app().await;
    let mut state = app.state.clone();
    state.cors_config.allowed_origins = vec!["*".to_string(), "http://localhost:5173".to_string()];

    let router = rollcall::router::build_router(state.clone(), rollcall::router::api_routes(&state));
    let request = Request::builder()
        .uri("/api/auth/session")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
}
