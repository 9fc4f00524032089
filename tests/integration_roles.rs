mod common;

use axum::http::StatusCode;
use common::{ADMIN_EMAIL, ADMIN_ID, STUDENT_ID, TEACHER_ID, setup_test_app};
use rollcall_auth::UserType;

#[tokio::test]
async fn test_admin_route_allows_admin() {
    let app = setup_test_app().await;
    let token = app.login_token(UserType::Admin, ADMIN_EMAIL).await;

    let response = app.get_with_bearer("/api/admins", &token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user_id"], ADMIN_ID);
    assert_eq!(response.body["user_type"], "admin");
}

#[tokio::test]
async fn test_admin_route_rejects_student() {
    let app = setup_test_app().await;
    let token = app.login_token(UserType::Student, STUDENT_ID).await;

    let response = app.get_with_bearer("/api/admins", &token).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.translate_key(), "auth.insufficient_permissions");
}

#[tokio::test]
async fn test_admin_route_without_token() {
    let app = setup_test_app().await;

    let response = app.get_anonymous("/api/admins").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.translate_key(), "auth.missing_token");
}

#[tokio::test]
async fn test_teacher_route() {
    let app = setup_test_app().await;
    let teacher = app.login_token(UserType::Teacher, TEACHER_ID).await;
    let admin = app.login_token(UserType::Admin, ADMIN_EMAIL).await;

    assert_eq!(
        app.get_with_cookie("/api/grades", &teacher).await.status,
        StatusCode::OK
    );
    assert_eq!(
        app.get_with_bearer("/api/grades", &admin).await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_staff_route() {
    let app = setup_test_app().await;
    let teacher = app.login_token(UserType::Teacher, TEACHER_ID).await;
    let admin = app.login_token(UserType::Admin, ADMIN_EMAIL).await;
    let student = app.login_token(UserType::Student, STUDENT_ID).await;

    assert_eq!(
        app.get_with_bearer("/api/staff", &teacher).await.status,
        StatusCode::OK
    );
    assert_eq!(
        app.get_with_bearer("/api/staff", &admin).await.status,
        StatusCode::OK
    );
    assert_eq!(
        app.get_with_bearer("/api/staff", &student).await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_gate_without_authentication_rejects() {
    let app = setup_test_app().await;
    let token = app.login_token(UserType::Admin, ADMIN_EMAIL).await;

    // Nothing validated the token, so the gate finds no caller.
    let response = app.get_with_bearer("/api/unguarded", &token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.translate_key(), "auth.authentication_required");
}

#[tokio::test]
async fn test_revoked_token_is_rejected_before_role_check() {
    let app = setup_test_app().await;
    let token = app.login_token(UserType::Student, STUDENT_ID).await;
    app.logout_with_bearer(&token).await;

    let response = app.get_with_bearer("/api/admins", &token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.translate_key(), "auth.revoked_token");
}
