use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shoplist_core::AppError;
use shoplist_models::{ErrorResponse, IdResponse, SignInRequest, SignUpRequest, TokenResponse};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = IdResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let id = AuthService::sign_up(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// Sign in and receive an access token
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = AuthService::sign_in(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(TokenResponse { token }))
}
