use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use shoplist_core::AppError;
use shoplist_models::{CreateListDto, ShoppingList, UpdateListDto};

use super::repository::ListRepository;
use crate::metrics::track_list_created;

pub const EMPTY_UPDATE_MESSAGE: &str = "update structure has no values";

fn list_not_found() -> AppError {
    AppError::not_found(anyhow!("List not found"))
}

pub struct ListService;

impl ListService {
    #[instrument(skip(db, dto))]
    pub async fn create_list(
        db: &PgPool,
        user_id: i32,
        dto: CreateListDto,
    ) -> Result<i32, AppError> {
        let id = ListRepository::create(db, user_id, &dto).await?;
        track_list_created();
        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn get_lists(db: &PgPool, user_id: i32) -> Result<Vec<ShoppingList>, AppError> {
        ListRepository::find_all(db, user_id).await
    }

    #[instrument(skip(db))]
    pub async fn get_list(
        db: &PgPool,
        user_id: i32,
        list_id: i32,
    ) -> Result<ShoppingList, AppError> {
        ListRepository::find_by_id(db, user_id, list_id)
            .await?
            .ok_or_else(list_not_found)
    }

    /// Fails with `404` unless `list_id` belongs to `user_id`.
    #[instrument(skip(db))]
    pub async fn ensure_owned(db: &PgPool, user_id: i32, list_id: i32) -> Result<(), AppError> {
        if ListRepository::exists(db, user_id, list_id).await? {
            Ok(())
        } else {
            Err(list_not_found())
        }
    }

    #[instrument(skip(db, dto))]
    pub async fn update_list(
        db: &PgPool,
        user_id: i32,
        list_id: i32,
        dto: UpdateListDto,
    ) -> Result<(), AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!(EMPTY_UPDATE_MESSAGE)));
        }

        match ListRepository::update(db, user_id, list_id, &dto).await? {
            0 => Err(list_not_found()),
            _ => Ok(()),
        }
    }

    #[instrument(skip(db))]
    pub async fn delete_list(db: &PgPool, user_id: i32, list_id: i32) -> Result<(), AppError> {
        match ListRepository::delete(db, user_id, list_id).await? {
            0 => Err(list_not_found()),
            _ => Ok(()),
        }
    }
}
