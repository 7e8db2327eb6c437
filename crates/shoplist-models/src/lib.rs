//! # Shoplist Models
//!
//! Database rows and request/response DTOs for the Shoplist services.
//!
//! - [`auth`]: Accounts, sign-up and sign-in payloads
//! - [`lists`]: Shopping lists
//! - [`items`]: Shopping list items
//! - [`oauth`]: OAuth2 authorize/token payloads
//! - [`common`]: Shared response shapes

pub mod auth;
pub mod common;
pub mod items;
pub mod lists;
pub mod oauth;

// Re-export commonly used types at crate root for convenience
pub use auth::{SignInRequest, SignUpRequest, TokenResponse, UserCredentials};
pub use common::{ErrorResponse, IdResponse};
pub use items::{CreateItemDto, ShoppingItem, UpdateItemDto};
pub use lists::{CreateListDto, ShoppingList, UpdateListDto};
pub use oauth::{AuthorizeParams, OAuthErrorResponse, OAuthTokenRequest, OAuthTokenResponse};
