pub mod auth;
pub mod items;
pub mod lists;
pub mod oauth;
