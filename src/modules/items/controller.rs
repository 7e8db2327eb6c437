use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shoplist_core::AppError;
use shoplist_models::{CreateItemDto, ErrorResponse, IdResponse, ShoppingItem, UpdateItemDto};

use super::service::ItemService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    post,
    path = "/api/lists/{id}/items",
    params(("id" = i32, Path, description = "List ID")),
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Item created", body = IdResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Items",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(list_id): ValidatedPath<i32>,
    ValidatedJson(dto): ValidatedJson<CreateItemDto>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let user_id = auth_user.user_id()?;
    let id = ItemService::create_item(&state.db, user_id, list_id, dto).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get,
    path = "/api/lists/{id}/items",
    params(("id" = i32, Path, description = "List ID")),
    responses(
        (status = 200, description = "Items of the list", body = Vec<ShoppingItem>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse)
    ),
    tag = "Items",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_list_items(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(list_id): ValidatedPath<i32>,
) -> Result<Json<Vec<ShoppingItem>>, AppError> {
    let user_id = auth_user.user_id()?;
    let items = ItemService::get_list_items(&state.db, user_id, list_id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item found", body = ShoppingItem),
        (status = 400, description = "Invalid item ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "Items",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<ShoppingItem>, AppError> {
    let user_id = auth_user.user_id()?;
    let item = ItemService::get_item(&state.db, user_id, id).await?;
    Ok(Json(item))
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Item ID")),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated", body = IdResponse),
        (status = 400, description = "Empty update or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Items",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateItemDto>,
) -> Result<Json<IdResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    ItemService::update_item(&state.db, user_id, id, dto).await?;
    Ok(Json(IdResponse { id }))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted", body = IdResponse),
        (status = 400, description = "Invalid item ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "Items",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<IdResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    ItemService::delete_item(&state.db, user_id, id).await?;
    Ok(Json(IdResponse { id }))
}
