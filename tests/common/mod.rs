#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router, middleware};
use http_body_util::BodyExt;
use rollcall::middleware::auth::AuthContext;
use rollcall::middleware::role::{require_admin, require_staff, require_teacher};
use rollcall::router::{api_routes, authenticated, build_router};
use rollcall::state::AppState;
use rollcall_auth::{
    CredentialRecord, CredentialStores, InMemoryCredentialStore, TokenIssuer, UserType,
};
use rollcall_cache::MemoryCache;
use rollcall_config::JwtConfig;
use rollcall_core::hash_password_with_cost;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const PASSWORD: &str = "Secret123!";

pub const ADMIN_EMAIL: &str = "admin@school.com";
pub const ADMIN_ID: &str = "A-1";
pub const DISABLED_ADMIN_EMAIL: &str = "former@school.com";
pub const TEACHER_ID: &str = "T-100";
pub const STUDENT_ID: &str = "S-200";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        token_lifetime: 3600,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub cache: Arc<MemoryCache>,
    pub admins: Arc<InMemoryCredentialStore>,
    pub teachers: Arc<InMemoryCredentialStore>,
    pub students: Arc<InMemoryCredentialStore>,
}

fn record(user_id: &str, identifier: &str, active: bool) -> CredentialRecord {
    CredentialRecord {
        user_id: user_id.to_string(),
        identifier: identifier.to_string(),
        password_hash: hash_password_with_cost(PASSWORD, 4).unwrap(),
        active,
    }
}

async fn whoami(context: AuthContext) -> Json<Value> {
    Json(json!({
        "user_id": context.user_id,
        "user_type": context.user_type,
    }))
}

/// App with the real `/api/auth` routes plus role-gated sample groups:
/// `/api/admins` (admin), `/api/grades` (teacher), `/api/staff` (admin or
/// teacher).
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(InMemoryCredentialStore::new()).await
}

/// Same as [`setup_test_app`] with a custom teacher store.
pub async fn setup_test_app_with(teachers: InMemoryCredentialStore) -> TestApp {
    let admins = Arc::new(InMemoryCredentialStore::new());
    let teachers = Arc::new(teachers);
    let students = Arc::new(InMemoryCredentialStore::new());

    admins.insert(record(ADMIN_ID, ADMIN_EMAIL, true)).await;
    admins
        .insert(record("A-2", DISABLED_ADMIN_EMAIL, false))
        .await;
    teachers.insert(record(TEACHER_ID, TEACHER_ID, true)).await;
    students.insert(record(STUDENT_ID, STUDENT_ID, true)).await;

    let cache = Arc::new(MemoryCache::new());
    let stores = CredentialStores::new(admins.clone(), teachers.clone(), students.clone());
    let issuer = TokenIssuer::new(test_jwt_config(), stores, cache.clone());
    let state = AppState::new(issuer);

    let admin_routes = authenticated(
        Router::new()
            .route("/admins", get(whoami))
            .route_layer(middleware::from_fn(require_admin)),
        &state,
    );
    let teacher_routes = authenticated(
        Router::new()
            .route("/grades", get(whoami))
            .route_layer(middleware::from_fn(require_teacher)),
        &state,
    );
    let staff_routes = authenticated(
        Router::new()
            .route("/staff", get(whoami))
            .route_layer(middleware::from_fn(require_staff)),
        &state,
    );
    // Gate without authentication in front of it
    let misconfigured = Router::new()
        .route("/unguarded", get(whoami))
        .route_layer(middleware::from_fn(require_admin));

    let api = api_routes(&state)
        .merge(admin_routes)
        .merge(teacher_routes)
        .merge(staff_routes)
        .merge(misconfigured);

    TestApp {
        router: build_router(state.clone(), api),
        state,
        cache,
        admins,
        teachers,
        students,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn translate_key(&self) -> &str {
        self.body["translate_key"].as_str().unwrap_or_default()
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn login(&self, user_type: UserType, user_id: &str, password: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "user_type": user_type,
                    "user_id": user_id,
                    "password": password,
                })
                .to_string(),
            ))
            .unwrap();

        self.send(request).await
    }

    /// Logs in and returns the issued token.
    pub async fn login_token(&self, user_type: UserType, user_id: &str) -> String {
        let response = self.login(user_type, user_id, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }

    pub async fn get_with_bearer(&self, uri: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn get_with_cookie(&self, uri: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .header(header::COOKIE, format!("auth_token={}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn get_anonymous(&self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn logout_with_bearer(&self, token: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }
}
