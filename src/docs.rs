use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use shoplist_models::{
    AuthorizeParams, CreateItemDto, CreateListDto, ErrorResponse, IdResponse, OAuthErrorResponse,
    OAuthTokenRequest, OAuthTokenResponse, ShoppingItem, ShoppingList, SignInRequest,
    SignUpRequest, TokenResponse, UpdateItemDto, UpdateListDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::sign_up,
        crate::modules::auth::controller::sign_in,
        crate::modules::oauth::controller::index,
        crate::modules::oauth::controller::authorize,
        crate::modules::oauth::controller::token,
        crate::modules::lists::controller::create_list,
        crate::modules::lists::controller::get_lists,
        crate::modules::lists::controller::get_list,
        crate::modules::lists::controller::update_list,
        crate::modules::lists::controller::delete_list,
        crate::modules::items::controller::create_item,
        crate::modules::items::controller::get_list_items,
        crate::modules::items::controller::get_item,
        crate::modules::items::controller::update_item,
        crate::modules::items::controller::delete_item,
    ),
    components(
        schemas(
            SignUpRequest,
            SignInRequest,
            TokenResponse,
            IdResponse,
            ErrorResponse,
            AuthorizeParams,
            OAuthTokenRequest,
            OAuthTokenResponse,
            OAuthErrorResponse,
            ShoppingList,
            CreateListDto,
            UpdateListDto,
            ShoppingItem,
            CreateItemDto,
            UpdateItemDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration and sign-in"),
        (name = "OAuth2", description = "OAuth2 authorization server"),
        (name = "Lists", description = "Shopping lists of the signed-in user"),
        (name = "Items", description = "Items of the signed-in user's lists")
    ),
    info(
        title = "Shoplist API",
        version = "0.1.0",
        description = "Shopping list service built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
