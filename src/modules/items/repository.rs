//! SQL for shopping items. Items carry no owner column; every statement
//! reaches the owner through `shopping_lists.user_id`.

use sqlx::PgPool;
use tracing::instrument;

use shoplist_core::AppError;
use shoplist_models::{CreateItemDto, ShoppingItem, UpdateItemDto};

pub struct ItemRepository;

impl ItemRepository {
    /// Inserts into `list_id` only when that list belongs to `user_id`.
    /// Returns `None` otherwise.
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        user_id: i32,
        list_id: i32,
        dto: &CreateItemDto,
    ) -> Result<Option<i32>, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"INSERT INTO shopping_items (list_id, title, description)
               SELECT sl.id, $3, $4
               FROM shopping_lists sl
               WHERE sl.id = $1 AND sl.user_id = $2
               RETURNING id"#,
        )
        .bind(list_id)
        .bind(user_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_optional(db)
        .await?;

        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn find_by_list(
        db: &PgPool,
        user_id: i32,
        list_id: i32,
    ) -> Result<Vec<ShoppingItem>, AppError> {
        let items = sqlx::query_as::<_, ShoppingItem>(
            r#"SELECT si.id, si.list_id, si.title, si.description, si.checked,
                      si.created_at, si.updated_at
               FROM shopping_items si
               INNER JOIN shopping_lists sl ON sl.id = si.list_id
               WHERE si.list_id = $1 AND sl.user_id = $2
               ORDER BY si.id"#,
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(items)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &PgPool,
        user_id: i32,
        item_id: i32,
    ) -> Result<Option<ShoppingItem>, AppError> {
        let item = sqlx::query_as::<_, ShoppingItem>(
            r#"SELECT si.id, si.list_id, si.title, si.description, si.checked,
                      si.created_at, si.updated_at
               FROM shopping_items si
               INNER JOIN shopping_lists sl ON sl.id = si.list_id
               WHERE si.id = $1 AND sl.user_id = $2"#,
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(item)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        user_id: i32,
        item_id: i32,
        dto: &UpdateItemDto,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"UPDATE shopping_items si
               SET title = COALESCE($3, si.title),
                   description = COALESCE($4, si.description),
                   checked = COALESCE($5, si.checked),
                   updated_at = NOW()
               FROM shopping_lists sl
               WHERE si.id = $1 AND sl.id = si.list_id AND sl.user_id = $2"#,
        )
        .bind(item_id)
        .bind(user_id)
        .bind(dto.title.as_deref())
        .bind(dto.description.as_deref())
        .bind(dto.checked)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, user_id: i32, item_id: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"DELETE FROM shopping_items si
               USING shopping_lists sl
               WHERE si.id = $1 AND sl.id = si.list_id AND sl.user_id = $2"#,
        )
        .bind(item_id)
        .bind(user_id)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }
}
