//! Borrow/return endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::borrow_log::{
        BorrowLog, BorrowLogDetails, BorrowLogQuery, BorrowRequest, ReturnRequest,
    },
};

use super::{CallerIdentity, CallerRole, Role};

/// Borrow response with the created log
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    /// Status message
    pub message: String,
    /// The created borrow log
    pub log: BorrowLog,
}

/// Return response with the closed log
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Status message
    pub message: String,
    /// The updated borrow log
    pub log: BorrowLog,
}

/// List borrow logs, optionally filtered by user
#[utoipa::path(
    get,
    path = "/borrow",
    tag = "borrow",
    params(
        ("userId" = Option<String>, Query, description = "Filter by borrower identity")
    ),
    responses(
        (status = 200, description = "Borrow logs, newest first", body = Vec<BorrowLogDetails>)
    )
)]
pub async fn list_borrow_logs(
    State(state): State<crate::AppState>,
    Query(query): Query<BorrowLogQuery>,
) -> AppResult<Json<Vec<BorrowLogDetails>>> {
    let logs = state.services.loans.list(query.user_id.as_deref()).await?;
    Ok(Json(logs))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrow",
    request_body = BorrowRequest,
    params(
        ("x-user-role" = String, Header, description = "Caller role, must be 'user'"),
        ("x-user-id" = String, Header, description = "Borrower identity")
    ),
    responses(
        (status = 201, description = "Book borrowed", body = BorrowResponse),
        (status = 400, description = "Missing identity or invalid request fields"),
        (status = 403, description = "Caller is not a borrower"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is out of stock")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    role: CallerRole,
    CallerIdentity(identity): CallerIdentity,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    role.require(Role::Borrower)?;

    let log = state.services.loans.borrow(identity, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            message: "Book borrowed successfully".to_string(),
            log,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/borrow/return",
    tag = "borrow",
    request_body = ReturnRequest,
    params(
        ("x-user-role" = String, Header, description = "Caller role, must be 'user'"),
        ("x-user-id" = String, Header, description = "Borrower identity")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 400, description = "Missing identity or borrow ID"),
        (status = 403, description = "Loan belongs to another user"),
        (status = 404, description = "Borrow record not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    role: CallerRole,
    CallerIdentity(identity): CallerIdentity,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<ReturnResponse>> {
    role.require(Role::Borrower)?;

    let log = state.services.loans.return_borrow(identity, request).await?;

    Ok(Json(ReturnResponse {
        message: "Book returned successfully".to_string(),
        log,
    }))
}
