//! # Shoplist Auth
//!
//! JWT claims and token utilities shared by the auth service (which issues
//! tokens) and the API service (which verifies them).
//!
//! - [`claims`]: JWT claim structure
//! - [`jwt`]: Token creation and verification
//!
//! Both services sign with the same HS256 secret, so the API service can
//! verify sign-in tokens and OAuth2 access tokens without calling back into
//! the auth service.
//!
//! # Example
//!
//! ```ignore
//! use shoplist_auth::{create_access_token, verify_token};
//! use shoplist_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(42, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, 42);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, create_oauth_access_token, verify_token};
