//! # Shoplist Config
//!
//! Configuration types for the Shoplist services, loaded from environment
//! variables:
//!
//! - [`jwt`]: JWT signing secret and access token lifetime
//! - [`oauth`]: Registered OAuth2 client and token lifetimes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address
//!
//! # Example
//!
//! ```ignore
//! use shoplist_config::{CorsConfig, JwtConfig, OAuthConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let oauth_config = OAuthConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod oauth;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use oauth::{OAuthClient, OAuthConfig};
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
