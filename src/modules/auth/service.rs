use sqlx::PgPool;
use tracing::{instrument, warn};

use shoplist_auth::create_access_token;
use shoplist_config::JwtConfig;
use shoplist_core::{AppError, generate_salt, hash_password, verify_password};
use shoplist_models::{SignInRequest, SignUpRequest};

use super::repository::UserRepository;
use crate::metrics::{
    track_sign_in_failure, track_sign_in_success, track_token_issued, track_user_registered,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn sign_up(db: &PgPool, dto: SignUpRequest) -> Result<i32, AppError> {
        let salt = generate_salt();
        let password_hash = hash_password(&dto.password, &salt)?;

        let id = UserRepository::create(db, &dto.username, &salt, &password_hash).await?;

        track_user_registered();
        Ok(id)
    }

    /// Checks the credentials and issues an access token.
    ///
    /// Unknown usernames and wrong passwords fail with the same message.
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn sign_in(
        db: &PgPool,
        dto: SignInRequest,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        let Some(credentials) = UserRepository::find_credentials(db, &dto.username).await? else {
            warn!("sign-in for unknown user");
            track_sign_in_failure("unknown_user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &credentials.salt, &credentials.password_hash)? {
            warn!(user_id = credentials.id, "sign-in with wrong password");
            track_sign_in_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = create_access_token(credentials.id, jwt_config)?;

        track_sign_in_success();
        track_token_issued("password");
        Ok(token)
    }
}
