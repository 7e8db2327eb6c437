mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use url::Url;

use common::{
    TEST_PASSWORD, TestResponse, get_auth_token, into_test_response, send, setup_test_app,
    sign_up, test_jwt_config,
};
use shoplist::shoplist_auth::verify_token;

// "000000:123456"
const BASIC_CREDENTIALS: &str = "Basic MDAwMDAwOjEyMzQ1Ng==";

// The client domain, recorded as the redirect when authorize omits one
const DEFAULT_REDIRECT: &str = "http%3A%2F%2Flocalhost%3A80%2Foauth";

async fn post_token(app: &Router, form: &str, basic: Option<&str>) -> TestResponse {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/oauth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(basic) = basic {
        builder = builder.header(header::AUTHORIZATION, basic);
    }
    let request = builder.body(Body::from(form.to_string())).unwrap();
    into_test_response(app.clone().oneshot(request).await.unwrap()).await
}

/// Signs a user in and runs the authorize step, returning `(user_id, code)`.
async fn authorization_code(app: &Router) -> (i64, String) {
    let (user_id, username) = sign_up(app).await;
    let token = get_auth_token(app, &username, TEST_PASSWORD).await;

    let response = send(
        app,
        "GET",
        "/oauth/authorize?response_type=code&client_id=000000&scope=lists&state=xyz",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::FOUND);

    let location = response.headers[header::LOCATION].to_str().unwrap();
    let url = Url::parse(location).unwrap();
    let code = url
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    (user_id, code)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_oauth_index(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, "GET", "/oauth/", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({}));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_authorize_redirects_with_code_and_state(pool: PgPool) {
    let app = setup_test_app(pool);
    let (_, username) = sign_up(&app).await;
    let token = get_auth_token(&app, &username, TEST_PASSWORD).await;

    let response = send(
        &app,
        "GET",
        "/oauth/authorize?response_type=code&client_id=000000&redirect_uri=http://localhost:80/oauth/callback&state=abc",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::FOUND);
    let location = response.headers[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("http://localhost/oauth/callback?code="));
    assert!(location.ends_with("&state=abc"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_authorize_requires_bearer_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(
        &app,
        "GET",
        "/oauth/authorize?response_type=code&client_id=000000",
        None,
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_authorize_rejects_foreign_redirect(pool: PgPool) {
    let app = setup_test_app(pool);
    let (_, username) = sign_up(&app).await;
    let token = get_auth_token(&app, &username, TEST_PASSWORD).await;

    let response = send(
        &app,
        "GET",
        "/oauth/authorize?response_type=code&client_id=000000&redirect_uri=http://evil.example.com/cb",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_request");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_authorize_unknown_client(pool: PgPool) {
    let app = setup_test_app(pool);
    let (_, username) = sign_up(&app).await;
    let token = get_auth_token(&app, &username, TEST_PASSWORD).await;

    let response = send(
        &app,
        "GET",
        "/oauth/authorize?response_type=code&client_id=999999",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid_client");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_code_exchange_issues_token_pair(pool: PgPool) {
    let app = setup_test_app(pool);
    let (user_id, code) = authorization_code(&app).await;

    let response = post_token(
        &app,
        &format!(
            "grant_type=authorization_code&code={}&redirect_uri={}",
            code, DEFAULT_REDIRECT
        ),
        Some(BASIC_CREDENTIALS),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CACHE_CONTROL], "no-store");
    assert_eq!(response.body["token_type"], "Bearer");
    assert_eq!(response.body["expires_in"], 7200);
    assert_eq!(response.body["scope"], "lists");
    assert!(response.body["refresh_token"].is_string());

    let access_token = response.body["access_token"].as_str().unwrap();
    let claims = verify_token(access_token, &test_jwt_config()).unwrap();
    assert_eq!(claims.user_id().unwrap() as i64, user_id);
    assert_eq!(claims.aud.as_deref(), Some("000000"));

    let lists = send(&app, "GET", "/api/lists", Some(access_token), None).await;
    assert_eq!(lists.status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_code_cannot_be_replayed(pool: PgPool) {
    let app = setup_test_app(pool);
    let (_, code) = authorization_code(&app).await;
    let form = format!(
        "grant_type=authorization_code&code={}&redirect_uri={}&client_id=000000&client_secret=123456",
        code, DEFAULT_REDIRECT
    );

    let first = post_token(&app, &form, None).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = post_token(&app, &form, None).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["error"], "invalid_grant");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_code_exchange_with_mismatched_redirect(pool: PgPool) {
    let app = setup_test_app(pool);
    let (_, code) = authorization_code(&app).await;

    let response = post_token(
        &app,
        &format!(
            "grant_type=authorization_code&code={}&redirect_uri=http%3A%2F%2Flocalhost%3A80%2Foauth%2Fother",
            code
        ),
        Some(BASIC_CREDENTIALS),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_grant");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_code_exchange_requires_redirect_uri(pool: PgPool) {
    let app = setup_test_app(pool);
    let (_, code) = authorization_code(&app).await;

    let response = post_token(
        &app,
        &format!("grant_type=authorization_code&code={}", code),
        Some(BASIC_CREDENTIALS),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_request");

    // The rejected request did not consume the code
    let retry = post_token(
        &app,
        &format!(
            "grant_type=authorization_code&code={}&redirect_uri={}",
            code, DEFAULT_REDIRECT
        ),
        Some(BASIC_CREDENTIALS),
    )
    .await;
    assert_eq!(retry.status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_token_rotation(pool: PgPool) {
    let app = setup_test_app(pool);
    let (_, code) = authorization_code(&app).await;
    let pair = post_token(
        &app,
        &format!(
            "grant_type=authorization_code&code={}&redirect_uri={}",
            code, DEFAULT_REDIRECT
        ),
        Some(BASIC_CREDENTIALS),
    )
    .await;
    let refresh_token = pair.body["refresh_token"].as_str().unwrap().to_string();
    let form = format!("grant_type=refresh_token&refresh_token={}", refresh_token);

    let rotated = post_token(&app, &form, Some(BASIC_CREDENTIALS)).await;
    assert_eq!(rotated.status, StatusCode::OK);
    assert_ne!(rotated.body["refresh_token"], pair.body["refresh_token"]);

    let reused = post_token(&app, &form, Some(BASIC_CREDENTIALS)).await;
    assert_eq!(reused.status, StatusCode::BAD_REQUEST);
    assert_eq!(reused.body["error"], "invalid_grant");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_client_credentials_grant(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = post_token(
        &app,
        "grant_type=client_credentials&client_id=000000&client_secret=123456",
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("refresh_token").is_none());

    let access_token = response.body["access_token"].as_str().unwrap();
    let claims = verify_token(access_token, &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, "000000");

    // Not a user token: user-scoped routes refuse it.
    let lists = send(&app, "GET", "/api/lists", Some(access_token), None).await;
    assert_eq!(lists.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_with_bad_client_secret(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = post_token(
        &app,
        "grant_type=client_credentials&client_id=000000&client_secret=wrong",
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid_client");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_without_client_credentials(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = post_token(&app, "grant_type=client_credentials", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid_client");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unsupported_grant_type(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = post_token(
        &app,
        "grant_type=password&username=a&password=b",
        Some(BASIC_CREDENTIALS),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "unsupported_grant_type");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_missing_grant_type(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = post_token(&app, "code=abc", Some(BASIC_CREDENTIALS)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_request");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_with_non_basic_authorization(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = post_token(
        &app,
        "grant_type=client_credentials&client_id=000000&client_secret=123456",
        Some("Bearer abc"),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid_client");
}
