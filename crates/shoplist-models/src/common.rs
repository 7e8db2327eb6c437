use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a created or modified resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdResponse {
    pub id: i32,
}

/// Error body returned by every non-OAuth2 endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
