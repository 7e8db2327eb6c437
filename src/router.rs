use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::items::router::init_items_router;
use crate::modules::lists::router::init_lists_router;
use crate::modules::oauth::router::init_oauth_router;
use crate::state::AppState;

/// Which half of the system a process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ServiceMode {
    /// Both the list API and the auth service in one process.
    #[default]
    All,
    /// `/api` only.
    Api,
    /// `/auth` and `/oauth` only.
    Auth,
}

impl ServiceMode {
    fn serves_api(self) -> bool {
        matches!(self, ServiceMode::All | ServiceMode::Api)
    }

    fn serves_auth(self) -> bool {
        matches!(self, ServiceMode::All | ServiceMode::Auth)
    }
}

pub fn init_router(state: AppState) -> Router {
    init_service_router(state, ServiceMode::All)
}

pub fn init_service_router(state: AppState, mode: ServiceMode) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()));

    if mode.serves_auth() {
        router = router
            .nest("/auth", init_auth_router())
            .merge(init_oauth_router());
    }

    if mode.serves_api() {
        router = router.nest(
            "/api",
            Router::new()
                .nest("/lists", init_lists_router())
                .nest("/items", init_items_router()),
        );
    }

    let cors = cors_layer(&state);

    router
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
