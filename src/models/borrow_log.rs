//! Borrow log model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::BookSummary;

/// Borrow log model from database
///
/// `return_date` is null while the loan is outstanding; once set it is
/// never cleared or changed again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowLog {
    pub id: i32,
    pub user_id: String,
    pub book_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// Borrow log enriched with its book for display
///
/// `book` is null when the referenced book has been deleted; the log itself
/// is kept (no referential cleanup).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowLogDetails {
    pub id: i32,
    pub user_id: String,
    pub book_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub book: Option<BookSummary>,
}

/// Validated parameters of a borrow operation
#[derive(Debug)]
pub struct CreateBorrow {
    pub user_id: String,
    pub book_id: i32,
    pub latitude: f64,
    pub longitude: f64,
}

/// Borrow request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub book_id: Option<i32>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be a number between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be a number between -180 and 180"))]
    pub longitude: Option<f64>,
}

/// Return request body
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub borrow_id: Option<i32>,
}

/// Query parameters for listing borrow logs
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowLogQuery {
    /// Exact match on the borrower's identity
    pub user_id: Option<String>,
}
