//! Access token creation and verification.
//!
//! Tokens are HS256 JWTs. Sign-in tokens carry only the user id; OAuth2
//! tokens additionally carry the client id as audience and the granted
//! scope. Verification accepts both.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use shoplist_config::JwtConfig;
use shoplist_core::AppError;

use crate::claims::Claims;

fn sign(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

fn timestamps(ttl_seconds: i64) -> (usize, usize) {
    let now = Utc::now().timestamp();
    (now as usize, (now + ttl_seconds).max(0) as usize)
}

/// Creates a sign-in access token for `user_id`, valid for
/// `jwt_config.access_token_expiry` seconds.
pub fn create_access_token(user_id: i32, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let (iat, exp) = timestamps(jwt_config.access_token_expiry);

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat,
        aud: None,
        scope: None,
    };

    sign(&claims, jwt_config)
}

/// Creates an OAuth2 access token for `subject`, issued to `client_id`.
pub fn create_oauth_access_token(
    subject: &str,
    client_id: &str,
    scope: Option<&str>,
    ttl_seconds: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let (iat, exp) = timestamps(ttl_seconds);

    let claims = Claims {
        sub: subject.to_string(),
        exp,
        iat,
        aud: Some(client_id.to_string()),
        scope: scope.filter(|s| !s.is_empty()).map(str::to_string),
    };

    sign(&claims, jwt_config)
}

/// Verifies signature, algorithm and expiry and returns the claims.
///
/// Any failure is reported as `401 Unauthorized`.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}
