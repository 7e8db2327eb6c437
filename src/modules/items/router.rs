use axum::{Router, routing::get};

use super::controller::{delete_item, get_item, update_item};
use crate::state::AppState;

/// Item routes addressed by item id. Routes scoped to a list live in the
/// lists router under `/{id}/items`.
pub fn init_items_router() -> Router<AppState> {
    Router::new().route("/{id}", get(get_item).put(update_item).delete(delete_item))
}
