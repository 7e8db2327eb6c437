use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use shoplist_core::AppError;
use shoplist_models::{CreateItemDto, ShoppingItem, UpdateItemDto};

use super::repository::ItemRepository;
use crate::metrics::track_item_created;
use crate::modules::lists::service::{EMPTY_UPDATE_MESSAGE, ListService};

fn item_not_found() -> AppError {
    AppError::not_found(anyhow!("Item not found"))
}

pub struct ItemService;

impl ItemService {
    #[instrument(skip(db, dto))]
    pub async fn create_item(
        db: &PgPool,
        user_id: i32,
        list_id: i32,
        dto: CreateItemDto,
    ) -> Result<i32, AppError> {
        ListService::ensure_owned(db, user_id, list_id).await?;

        let id = ItemRepository::create(db, user_id, list_id, &dto)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("List not found")))?;

        track_item_created();
        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn get_list_items(
        db: &PgPool,
        user_id: i32,
        list_id: i32,
    ) -> Result<Vec<ShoppingItem>, AppError> {
        ListService::ensure_owned(db, user_id, list_id).await?;
        ItemRepository::find_by_list(db, user_id, list_id).await
    }

    #[instrument(skip(db))]
    pub async fn get_item(
        db: &PgPool,
        user_id: i32,
        item_id: i32,
    ) -> Result<ShoppingItem, AppError> {
        ItemRepository::find_by_id(db, user_id, item_id)
            .await?
            .ok_or_else(item_not_found)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_item(
        db: &PgPool,
        user_id: i32,
        item_id: i32,
        dto: UpdateItemDto,
    ) -> Result<(), AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!(EMPTY_UPDATE_MESSAGE)));
        }

        match ItemRepository::update(db, user_id, item_id, &dto).await? {
            0 => Err(item_not_found()),
            _ => Ok(()),
        }
    }

    #[instrument(skip(db))]
    pub async fn delete_item(db: &PgPool, user_id: i32, item_id: i32) -> Result<(), AppError> {
        match ItemRepository::delete(db, user_id, item_id).await? {
            0 => Err(item_not_found()),
            _ => Ok(()),
        }
    }
}
