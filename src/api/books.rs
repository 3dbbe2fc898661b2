//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

use super::{CallerRole, Role};

/// List books with an optional search filter
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring matched against title or author")
    ),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list(query.search.as_deref()).await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Create a new book (admin only)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    params(
        ("x-user-role" = String, Header, description = "Caller role, must be 'admin'")
    ),
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    role: CallerRole,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    role.require(Role::Admin)?;

    let created = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update book fields (admin only)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    request_body = UpdateBook,
    params(
        ("id" = i32, Path, description = "Book ID"),
        ("x-user-role" = String, Header, description = "Caller role, must be 'admin'")
    ),
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    role: CallerRole,
    Path(id): Path<i32>,
    Json(update): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    role.require(Role::Admin)?;

    let updated = state.services.books.update(id, update).await?;
    Ok(Json(updated))
}

/// Delete a book (admin only)
///
/// Borrow logs referencing the book are kept; their listings show the book
/// as null afterwards.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID"),
        ("x-user-role" = String, Header, description = "Caller role, must be 'admin'")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    role: CallerRole,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    role.require(Role::Admin)?;

    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
