use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{authorize, index, token};
use crate::state::AppState;

/// Routes carry their full `/oauth` prefix so both `/oauth` and `/oauth/`
/// resolve to the landing endpoint.
pub fn init_oauth_router() -> Router<AppState> {
    Router::new()
        .route("/oauth", get(index))
        .route("/oauth/", get(index))
        .route("/oauth/authorize", get(authorize))
        .route("/oauth/token", post(token))
}
