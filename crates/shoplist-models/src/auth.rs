//! Account models and authentication DTOs.

use serde::{Deserialize, Serialize};
use shoplist_core::MAX_PASSWORD_BYTES;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Stored credentials for an account. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub salt: Vec<u8>,
    pub password_hash: String,
}

/// Account registration payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 255, message = "username must be 1-255 characters"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(
        length(min = 1, message = "password is required"),
        custom(function = "validate_password_bytes")
    )]
    #[schema(example = "password123")]
    pub password: String,
}

/// bcrypt reads at most 72 bytes, so the limit counts bytes, not characters.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("password must be at most 72 bytes".into()));
    }
    Ok(())
}

/// Sign-in payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Access token returned by a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
