//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

/// Escape LIKE/ILIKE metacharacters so a search term is matched literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books, optionally filtered by a case-insensitive substring
    /// matched against title or author.
    pub async fn search(&self, search: Option<&str>) -> AppResult<Vec<Book>> {
        let books = match search {
            Some(term) if !term.is_empty() => {
                let pattern = format!("%{}%", escape_like(term));
                sqlx::query_as::<_, Book>(
                    r#"
                    SELECT id, title, author, stock, created_at, updated_at
                    FROM books
                    WHERE title ILIKE $1 OR author ILIKE $1
                    ORDER BY id
                    "#,
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Book>(
                    "SELECT id, title, author, stock, created_at, updated_at FROM books ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author, stock, created_at, updated_at FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, stock)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, stock, created_at, updated_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.stock.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update book fields (partial update)
    pub async fn update(&self, id: i32, update: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                stock = COALESCE($4, stock),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, author, stock, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.author.as_deref())
        .bind(update.stock)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book. Borrow logs referencing it are kept.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_neutralizes_pattern_metacharacters() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
