//! SQL for shopping lists. Every statement is scoped by `user_id`, so a
//! list owned by someone else behaves exactly like a missing one.

use sqlx::PgPool;
use tracing::instrument;

use shoplist_core::AppError;
use shoplist_models::{CreateListDto, ShoppingList, UpdateListDto};

pub struct ListRepository;

impl ListRepository {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, user_id: i32, dto: &CreateListDto) -> Result<i32, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"INSERT INTO shopping_lists (user_id, title, description)
               VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(user_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_one(db)
        .await?;

        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool, user_id: i32) -> Result<Vec<ShoppingList>, AppError> {
        let lists = sqlx::query_as::<_, ShoppingList>(
            r#"SELECT id, title, description, created_at, updated_at
               FROM shopping_lists
               WHERE user_id = $1
               ORDER BY id"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(lists)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &PgPool,
        user_id: i32,
        list_id: i32,
    ) -> Result<Option<ShoppingList>, AppError> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r#"SELECT id, title, description, created_at, updated_at
               FROM shopping_lists
               WHERE id = $1 AND user_id = $2"#,
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(list)
    }

    #[instrument(skip(db))]
    pub async fn exists(db: &PgPool, user_id: i32, list_id: i32) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM shopping_lists WHERE id = $1 AND user_id = $2)",
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }

    /// Applies the present fields; returns the number of rows touched.
    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        user_id: i32,
        list_id: i32,
        dto: &UpdateListDto,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"UPDATE shopping_lists
               SET title = COALESCE($3, title),
                   description = COALESCE($4, description),
                   updated_at = NOW()
               WHERE id = $1 AND user_id = $2"#,
        )
        .bind(list_id)
        .bind(user_id)
        .bind(dto.title.as_deref())
        .bind(dto.description.as_deref())
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }

    /// Deletes the list; its items go with it through `ON DELETE CASCADE`.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, user_id: i32, list_id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM shopping_lists WHERE id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }
}
