use sqlx::PgPool;
use tracing::instrument;

use shoplist_core::AppError;
use shoplist_models::UserCredentials;

pub struct UserRepository;

impl UserRepository {
    /// Inserts a new account. A taken username is `409 Conflict`.
    #[instrument(skip(db, salt, password_hash))]
    pub async fn create(
        db: &PgPool,
        username: &str,
        salt: &[u8],
        password_hash: &str,
    ) -> Result<i32, AppError> {
        sqlx::query_scalar::<_, i32>(
            r#"INSERT INTO users (username, salt, password_hash)
               VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(username)
        .bind(salt)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict("Username is already taken");
            }
            AppError::from(e)
        })
    }

    #[instrument(skip(db))]
    pub async fn find_credentials(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, salt, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?;

        Ok(credentials)
    }
}
