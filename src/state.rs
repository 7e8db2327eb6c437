use std::sync::Arc;

use shoplist_config::{CorsConfig, JwtConfig, OAuthConfig};
use shoplist_db::PgPool;

use crate::modules::oauth::store::OAuthStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub oauth_config: OAuthConfig,
    pub cors_config: CorsConfig,
    pub oauth_store: Arc<OAuthStore>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        oauth_config: OAuthConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            db,
            jwt_config,
            oauth_config,
            cors_config,
            oauth_store: Arc::new(OAuthStore::default()),
        }
    }

    pub fn from_env(db: PgPool) -> Self {
        Self::new(
            db,
            JwtConfig::from_env(),
            OAuthConfig::from_env(),
            CorsConfig::from_env(),
        )
    }
}
