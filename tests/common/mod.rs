#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use shoplist::router::init_router;
use shoplist::shoplist_config::{CorsConfig, JwtConfig, OAuthConfig};
use shoplist::state::AppState;

pub const TEST_PASSWORD: &str = "testpass123";

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState::new(
        pool,
        test_jwt_config(),
        OAuthConfig::default(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    )
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

pub fn generate_unique_username() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("user_{}_{}", std::process::id(), n)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

/// Sends a JSON request (or an empty one when `body` is `None`).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    into_test_response(app.clone().oneshot(request).await.unwrap()).await
}

pub async fn into_test_response(response: axum::response::Response) -> TestResponse {
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

/// Registers a fresh user and returns `(id, username)`.
pub async fn sign_up(app: &Router) -> (i64, String) {
    let username = generate_unique_username();
    let response = send(
        app,
        "POST",
        "/auth/sign-up",
        None,
        Some(json!({ "username": username, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    (response.body["id"].as_i64().unwrap(), username)
}

pub async fn get_auth_token(app: &Router, username: &str, password: &str) -> String {
    let response = send(
        app,
        "POST",
        "/auth/sign-in",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["token"].as_str().unwrap().to_string()
}

/// Registers and signs in a fresh user, returning the bearer token.
pub async fn signed_in_user(app: &Router) -> String {
    let (_, username) = sign_up(app).await;
    get_auth_token(app, &username, TEST_PASSWORD).await
}

pub async fn create_list(app: &Router, token: &str, title: &str) -> i64 {
    let response = send(
        app,
        "POST",
        "/api/lists",
        Some(token),
        Some(json!({ "title": title, "description": "weekly" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}

pub async fn create_item(app: &Router, token: &str, list_id: i64, title: &str) -> i64 {
    let response = send(
        app,
        "POST",
        &format!("/api/lists/{}/items", list_id),
        Some(token),
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}
