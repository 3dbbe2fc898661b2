//! Book catalog model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Number of copies currently available for borrowing
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact book projection used to enrich borrow log listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub author: String,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Initial stock, defaults to 0
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
}

/// Update book request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.stock.is_none()
    }
}

/// Query parameters for listing books
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring matched against title or author
    pub search: Option<String>,
}
