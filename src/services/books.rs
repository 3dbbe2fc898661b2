//! Book catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books with an optional title/author substring filter
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Book>> {
        self.repository.books.search(search).await
    }

    /// Get book by ID
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if book.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if book.author.trim().is_empty() {
            return Err(AppError::Validation("Author is required".to_string()));
        }

        self.repository.books.create(&book).await
    }

    /// Update book fields
    pub async fn update(&self, id: i32, update: UpdateBook) -> AppResult<Book> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if update.is_empty() {
            return Err(AppError::Validation(
                "At least one field must be provided for update".to_string(),
            ));
        }

        if matches!(&update.title, Some(t) if t.trim().is_empty()) {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }
        if matches!(&update.author, Some(a) if a.trim().is_empty()) {
            return Err(AppError::Validation("Author cannot be empty".to_string()));
        }

        self.repository.books.update(id, &update).await
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
