use constant_time_eq::constant_time_eq;
use tracing::{info, instrument};
use url::Url;

use shoplist_auth::create_oauth_access_token;
use shoplist_config::{JwtConfig, OAuthClient, OAuthConfig};
use shoplist_models::{AuthorizeParams, OAuthTokenRequest, OAuthTokenResponse};

use super::error::OAuthError;
use super::store::{AuthorizationGrant, OAuthStore, RefreshGrant, TakeError};
use crate::metrics::track_token_issued;

const TOKEN_TYPE: &str = "Bearer";

/// Client credentials presented at the token endpoint, from HTTP Basic or
/// from the form body.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

pub struct OAuthService;

impl OAuthService {
    /// Validates an authorization request for `user_id` and returns the
    /// redirect target carrying a fresh code.
    #[instrument(skip(config, store))]
    pub async fn authorize(
        config: &OAuthConfig,
        store: &OAuthStore,
        user_id: i32,
        params: AuthorizeParams,
    ) -> Result<Url, OAuthError> {
        if params.response_type != "code" {
            return Err(OAuthError::UnsupportedResponseType(params.response_type));
        }

        let client = config
            .find_client(&params.client_id)
            .ok_or_else(|| OAuthError::InvalidClient("unknown client".to_string()))?;

        let redirect_uri = params
            .redirect_uri
            .filter(|uri| !uri.is_empty())
            .unwrap_or_else(|| client.domain.clone());
        if !client.allows_redirect(&redirect_uri) {
            return Err(OAuthError::InvalidRequest(
                "redirect_uri does not match the client domain".to_string(),
            ));
        }

        let mut target = Url::parse(&redirect_uri)
            .map_err(|_| OAuthError::InvalidRequest("redirect_uri is not a valid URL".to_string()))?;

        let grant = AuthorizationGrant {
            client_id: client.id.clone(),
            redirect_uri,
            user_id,
            scope: params.scope.filter(|s| !s.is_empty()),
        };
        let code = store.issue_code(grant, config.code_expiry).await;

        {
            let mut query = target.query_pairs_mut();
            query.append_pair("code", &code);
            if let Some(state) = params.state.as_deref() {
                query.append_pair("state", state);
            }
        }

        info!(client_id = %client.id, "authorization code issued");
        Ok(target)
    }

    /// Resolves and authenticates the calling client.
    pub fn authenticate_client<'a>(
        config: &'a OAuthConfig,
        credentials: Option<ClientCredentials>,
    ) -> Result<&'a OAuthClient, OAuthError> {
        let credentials = credentials.ok_or_else(|| {
            OAuthError::InvalidClient("client authentication is required".to_string())
        })?;

        let client = config
            .find_client(&credentials.client_id)
            .ok_or_else(|| OAuthError::InvalidClient("unknown client".to_string()))?;

        if !constant_time_eq(
            client.secret.as_bytes(),
            credentials.client_secret.as_bytes(),
        ) {
            return Err(OAuthError::InvalidClient(
                "client authentication failed".to_string(),
            ));
        }

        Ok(client)
    }

    #[instrument(skip(config, jwt_config, store, request), fields(grant_type = %request.grant_type))]
    pub async fn exchange(
        config: &OAuthConfig,
        jwt_config: &JwtConfig,
        store: &OAuthStore,
        client: &OAuthClient,
        request: OAuthTokenRequest,
    ) -> Result<OAuthTokenResponse, OAuthError> {
        match request.grant_type.as_str() {
            "authorization_code" => {
                Self::exchange_code(config, jwt_config, store, client, request).await
            }
            "refresh_token" => {
                Self::exchange_refresh_token(config, jwt_config, store, client, request).await
            }
            "client_credentials" => Self::client_credentials(config, jwt_config, client, request),
            "" => Err(OAuthError::InvalidRequest(
                "grant_type is required".to_string(),
            )),
            other => Err(OAuthError::UnsupportedGrantType(other.to_string())),
        }
    }

    async fn exchange_code(
        config: &OAuthConfig,
        jwt_config: &JwtConfig,
        store: &OAuthStore,
        client: &OAuthClient,
        request: OAuthTokenRequest,
    ) -> Result<OAuthTokenResponse, OAuthError> {
        let code = request
            .code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| OAuthError::InvalidRequest("code is required".to_string()))?;

        let redirect_uri = request
            .redirect_uri
            .filter(|r| !r.is_empty())
            .ok_or_else(|| OAuthError::InvalidRequest("redirect_uri is required".to_string()))?;

        let grant = store
            .take_code(&code, &client.id)
            .await
            .map_err(|e| match e {
                TakeError::Missing => OAuthError::InvalidGrant(
                    "authorization code is invalid or expired".to_string(),
                ),
                TakeError::OtherClient => OAuthError::InvalidGrant(
                    "authorization code was issued to another client".to_string(),
                ),
            })?;

        if redirect_uri != grant.redirect_uri {
            return Err(OAuthError::InvalidGrant(
                "redirect_uri does not match the authorization request".to_string(),
            ));
        }

        let subject = grant.user_id.to_string();
        let response =
            Self::issue_pair(config, jwt_config, store, client, subject, grant.scope).await?;
        track_token_issued("authorization_code");
        Ok(response)
    }

    async fn exchange_refresh_token(
        config: &OAuthConfig,
        jwt_config: &JwtConfig,
        store: &OAuthStore,
        client: &OAuthClient,
        request: OAuthTokenRequest,
    ) -> Result<OAuthTokenResponse, OAuthError> {
        let token = request
            .refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| OAuthError::InvalidRequest("refresh_token is required".to_string()))?;

        let grant = store
            .take_refresh_token(&token, &client.id)
            .await
            .map_err(|e| match e {
                TakeError::Missing => {
                    OAuthError::InvalidGrant("refresh token is invalid or expired".to_string())
                }
                TakeError::OtherClient => OAuthError::InvalidGrant(
                    "refresh token was issued to another client".to_string(),
                ),
            })?;

        if let Some(scope) = request.scope.as_deref().filter(|s| !s.is_empty())
            && Some(scope) != grant.scope.as_deref()
        {
            return Err(OAuthError::InvalidScope(
                "requested scope exceeds the original grant".to_string(),
            ));
        }

        let response =
            Self::issue_pair(config, jwt_config, store, client, grant.subject, grant.scope)
                .await?;
        track_token_issued("refresh_token");
        Ok(response)
    }

    fn client_credentials(
        config: &OAuthConfig,
        jwt_config: &JwtConfig,
        client: &OAuthClient,
        request: OAuthTokenRequest,
    ) -> Result<OAuthTokenResponse, OAuthError> {
        let scope = request.scope.filter(|s| !s.is_empty());
        let access_token = create_oauth_access_token(
            &client.id,
            &client.id,
            scope.as_deref(),
            config.access_token_expiry,
            jwt_config,
        )?;

        track_token_issued("client_credentials");
        Ok(OAuthTokenResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: config.access_token_expiry,
            refresh_token: None,
            scope,
        })
    }

    async fn issue_pair(
        config: &OAuthConfig,
        jwt_config: &JwtConfig,
        store: &OAuthStore,
        client: &OAuthClient,
        subject: String,
        scope: Option<String>,
    ) -> Result<OAuthTokenResponse, OAuthError> {
        let access_token = create_oauth_access_token(
            &subject,
            &client.id,
            scope.as_deref(),
            config.access_token_expiry,
            jwt_config,
        )?;

        let refresh_token = store
            .issue_refresh_token(
                RefreshGrant {
                    client_id: client.id.clone(),
                    subject,
                    scope: scope.clone(),
                },
                config.refresh_token_expiry,
            )
            .await;

        Ok(OAuthTokenResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: config.access_token_expiry,
            refresh_token: Some(refresh_token),
            scope,
        })
    }
}
