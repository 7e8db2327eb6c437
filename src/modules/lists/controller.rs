use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shoplist_core::AppError;
use shoplist_models::{CreateListDto, ErrorResponse, IdResponse, ShoppingList, UpdateListDto};

use super::service::ListService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    post,
    path = "/api/lists",
    request_body = CreateListDto,
    responses(
        (status = 201, description = "List created", body = IdResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateListDto>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let user_id = auth_user.user_id()?;
    let id = ListService::create_list(&state.db, user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get,
    path = "/api/lists",
    responses(
        (status = 200, description = "Lists owned by the caller", body = Vec<ShoppingList>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lists(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ShoppingList>>, AppError> {
    let user_id = auth_user.user_id()?;
    let lists = ListService::get_lists(&state.db, user_id).await?;
    Ok(Json(lists))
}

#[utoipa::path(
    get,
    path = "/api/lists/{id}",
    params(("id" = i32, Path, description = "List ID")),
    responses(
        (status = 200, description = "List found", body = ShoppingList),
        (status = 400, description = "Invalid list ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<ShoppingList>, AppError> {
    let user_id = auth_user.user_id()?;
    let list = ListService::get_list(&state.db, user_id, id).await?;
    Ok(Json(list))
}

#[utoipa::path(
    put,
    path = "/api/lists/{id}",
    params(("id" = i32, Path, description = "List ID")),
    request_body = UpdateListDto,
    responses(
        (status = 200, description = "List updated", body = IdResponse),
        (status = 400, description = "Empty update or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateListDto>,
) -> Result<Json<IdResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    ListService::update_list(&state.db, user_id, id, dto).await?;
    Ok(Json(IdResponse { id }))
}

#[utoipa::path(
    delete,
    path = "/api/lists/{id}",
    params(("id" = i32, Path, description = "List ID")),
    responses(
        (status = 200, description = "List and its items deleted", body = IdResponse),
        (status = 400, description = "Invalid list ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse)
    ),
    tag = "Lists",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<IdResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    ListService::delete_list(&state.db, user_id, id).await?;
    Ok(Json(IdResponse { id }))
}
