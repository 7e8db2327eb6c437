mod common;

use axum::Router;
use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{TEST_PASSWORD, generate_unique_username, send, sign_up, test_state};
use shoplist::router::{ServiceMode, init_service_router};

fn app_for(pool: PgPool, mode: ServiceMode) -> Router {
    init_service_router(test_state(pool), mode)
}

async fn assert_docs_served(app: &Router) {
    let response = send(app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["paths"].is_object());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_api_mode_has_no_auth_routes(pool: PgPool) {
    let app = app_for(pool, ServiceMode::Api);

    let sign_in = send(
        &app,
        "POST",
        "/auth/sign-in",
        None,
        Some(json!({ "username": generate_unique_username(), "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(sign_in.status, StatusCode::NOT_FOUND);

    let token = send(&app, "POST", "/oauth/token", None, None).await;
    assert_eq!(token.status, StatusCode::NOT_FOUND);

    // Mounted, but needs a bearer token
    let lists = send(&app, "GET", "/api/lists", None, None).await;
    assert_eq!(lists.status, StatusCode::UNAUTHORIZED);

    assert_docs_served(&app).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_auth_mode_has_no_api_routes(pool: PgPool) {
    let app = app_for(pool, ServiceMode::Auth);

    let lists = send(&app, "GET", "/api/lists", None, None).await;
    assert_eq!(lists.status, StatusCode::NOT_FOUND);

    let items = send(&app, "GET", "/api/items/1", None, None).await;
    assert_eq!(items.status, StatusCode::NOT_FOUND);

    // Auth routes still work
    sign_up(&app).await;
    let index = send(&app, "GET", "/oauth", None, None).await;
    assert_eq!(index.status, StatusCode::OK);

    assert_docs_served(&app).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_all_mode_serves_both(pool: PgPool) {
    let app = app_for(pool, ServiceMode::All);

    let (_, username) = sign_up(&app).await;
    let token = common::get_auth_token(&app, &username, TEST_PASSWORD).await;
    let lists = send(&app, "GET", "/api/lists", Some(&token), None).await;
    assert_eq!(lists.status, StatusCode::OK);

    assert_docs_served(&app).await;
}
