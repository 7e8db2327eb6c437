//! Shopping item models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShoppingItem {
    pub id: i32,
    pub list_id: i32,
    pub title: String,
    pub description: String,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItemDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    #[schema(example = "Milk")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "2 litres, semi-skimmed")]
    pub description: String,
}

/// Partial update: only the fields that are present change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItemDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub checked: Option<bool>,
}

impl UpdateItemDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.checked.is_none()
    }
}
