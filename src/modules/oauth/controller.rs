use axum::{
    Form, Json,
    extract::{Query, State, rejection::FormRejection, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
    typed_header::TypedHeaderRejection,
};
use serde_json::{Value, json};
use tracing::instrument;

use shoplist_models::{AuthorizeParams, OAuthErrorResponse, OAuthTokenRequest, OAuthTokenResponse};

use super::error::OAuthError;
use super::service::{ClientCredentials, OAuthService};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Start the authorization-code flow
///
/// Requires the resource owner's bearer token. Answers with a redirect to
/// the client carrying `code` and the echoed `state`.
#[utoipa::path(
    get,
    path = "/oauth/authorize",
    params(AuthorizeParams),
    responses(
        (status = 302, description = "Redirect to the client with an authorization code"),
        (status = 400, description = "Invalid authorization request", body = OAuthErrorResponse),
        (status = 401, description = "Missing or invalid bearer token, or unknown client", body = OAuthErrorResponse)
    ),
    tag = "OAuth2",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, params))]
pub async fn authorize(
    State(state): State<AppState>,
    auth_user: AuthUser,
    params: Result<Query<AuthorizeParams>, QueryRejection>,
) -> Result<Response, OAuthError> {
    let Query(params) = params.map_err(|e| OAuthError::InvalidRequest(e.body_text()))?;
    let user_id = auth_user
        .user_id()
        .map_err(|_| OAuthError::AccessDenied("token does not belong to a user".to_string()))?;

    let target =
        OAuthService::authorize(&state.oauth_config, &state.oauth_store, user_id, params).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target.to_string())]).into_response())
}

/// Exchange a grant for tokens
///
/// Accepts `authorization_code`, `refresh_token` and `client_credentials`.
/// Client credentials may be sent with HTTP Basic or in the form body.
#[utoipa::path(
    post,
    path = "/oauth/token",
    request_body(content = OAuthTokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Tokens issued", body = OAuthTokenResponse),
        (status = 400, description = "Invalid grant or request", body = OAuthErrorResponse),
        (status = 401, description = "Client authentication failed", body = OAuthErrorResponse)
    ),
    tag = "OAuth2"
)]
#[instrument(skip_all)]
pub async fn token(
    State(state): State<AppState>,
    basic: Result<Option<TypedHeader<Authorization<Basic>>>, TypedHeaderRejection>,
    form: Result<Form<OAuthTokenRequest>, FormRejection>,
) -> Result<Response, OAuthError> {
    // Present but not Basic, or undecodable
    let basic = basic.map_err(|_| {
        OAuthError::InvalidClient("client authentication must use HTTP Basic".to_string())
    })?;
    let Form(request) = form.map_err(|e| OAuthError::InvalidRequest(e.body_text()))?;

    let credentials = match basic {
        Some(TypedHeader(Authorization(basic))) => Some(ClientCredentials {
            client_id: basic.username().to_string(),
            client_secret: basic.password().to_string(),
        }),
        None => request
            .client_id
            .clone()
            .map(|client_id| ClientCredentials {
                client_id,
                client_secret: request.client_secret.clone().unwrap_or_default(),
            }),
    };

    let client = OAuthService::authenticate_client(&state.oauth_config, credentials)?;
    let tokens = OAuthService::exchange(
        &state.oauth_config,
        &state.jwt_config,
        &state.oauth_store,
        client,
        request,
    )
    .await?;

    Ok((
        [(header::CACHE_CONTROL, "no-store"), (header::PRAGMA, "no-cache")],
        Json(tokens),
    )
        .into_response())
}

/// OAuth2 landing endpoint
#[utoipa::path(
    get,
    path = "/oauth/",
    responses((status = 200, description = "Empty object")),
    tag = "OAuth2"
)]
pub async fn index() -> Json<Value> {
    Json(json!({}))
}
