//! OAuth2 authorization server configuration.
//!
//! The auth service acts as an OAuth2 provider for a registered client. The
//! client is read from the environment; token lifetimes default to those of
//! the authorization-code grant (2 hour access, 72 hour refresh, 10 minute
//! codes).
//!
//! # Environment Variables
//!
//! - `OAUTH_CLIENT_ID` (default `000000`)
//! - `OAUTH_CLIENT_SECRET` (default `123456`)
//! - `OAUTH_CLIENT_DOMAIN` (default `http://localhost:80/oauth`)
//! - `OAUTH_ACCESS_EXPIRY`, `OAUTH_REFRESH_EXPIRY`, `OAUTH_CODE_EXPIRY` (seconds)

use std::env;

use url::Url;

use crate::env_or;

/// A registered OAuth2 client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthClient {
    pub id: String,
    pub secret: String,
    /// Redirect URIs must share this origin and sit under its path.
    pub domain: String,
}

impl OAuthClient {
    /// A redirect is allowed when scheme, host and port equal the domain's,
    /// it carries no userinfo, and its path is the domain path or below it.
    pub fn allows_redirect(&self, redirect_uri: &str) -> bool {
        let (Ok(domain), Ok(redirect)) = (Url::parse(&self.domain), Url::parse(redirect_uri))
        else {
            return false;
        };

        if redirect.scheme() != domain.scheme()
            || redirect.host_str() != domain.host_str()
            || redirect.port_or_known_default() != domain.port_or_known_default()
            || !redirect.username().is_empty()
            || redirect.password().is_some()
        {
            return false;
        }

        path_is_under(domain.path(), redirect.path())
    }
}

/// Segment-aware prefix match: `/oauth` covers `/oauth/cb` but not `/oauthx`.
fn path_is_under(base: &str, path: &str) -> bool {
    match path.strip_prefix(base) {
        Some(rest) => rest.is_empty() || base.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

#[derive(Clone, Debug)]
pub struct OAuthConfig {
    pub clients: Vec<OAuthClient>,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    pub code_expiry: i64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            clients: vec![OAuthClient {
                id: "000000".to_string(),
                secret: "123456".to_string(),
                domain: "http://localhost:80/oauth".to_string(),
            }],
            access_token_expiry: 2 * 60 * 60,
            refresh_token_expiry: 72 * 60 * 60,
            code_expiry: 10 * 60,
        }
    }
}

impl OAuthConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        let default_client = &default.clients[0];

        let client = OAuthClient {
            id: env::var("OAUTH_CLIENT_ID").unwrap_or_else(|_| default_client.id.clone()),
            secret: env::var("OAUTH_CLIENT_SECRET")
                .unwrap_or_else(|_| default_client.secret.clone()),
            domain: env::var("OAUTH_CLIENT_DOMAIN")
                .unwrap_or_else(|_| default_client.domain.clone()),
        };

        Self {
            clients: vec![client],
            access_token_expiry: env_or("OAUTH_ACCESS_EXPIRY", default.access_token_expiry),
            refresh_token_expiry: env_or("OAUTH_REFRESH_EXPIRY", default.refresh_token_expiry),
            code_expiry: env_or("OAUTH_CODE_EXPIRY", default.code_expiry),
        }
    }

    pub fn find_client(&self, client_id: &str) -> Option<&OAuthClient> {
        self.clients.iter().find(|c| c.id == client_id)
    }
}
