use axum::{Router, routing::get};

use super::controller::{create_list, delete_list, get_list, get_lists, update_list};
use crate::modules::items::controller::{create_item, get_list_items};
use crate::state::AppState;

pub fn init_lists_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_lists).post(create_list))
        .route(
            "/{id}",
            get(get_list).put(update_list).delete(delete_list),
        )
        .route("/{id}/items", get(get_list_items).post(create_item))
}
