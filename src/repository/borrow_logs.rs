//! Borrow logs repository for database operations
//!
//! The borrow and return sequences are the transactional core of the server:
//! a book's stock counter and its borrow log rows must stay consistent under
//! concurrent requests. Both operations lock the rows they mutate with
//! `SELECT ... FOR UPDATE` inside a single transaction, so the
//! check-then-act sequences (stock > 0 before decrement, return_date null
//! before set) cannot race. An early error return drops the transaction,
//! which rolls it back.

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        borrow_log::{BorrowLog, BorrowLogDetails, CreateBorrow},
    },
};

#[derive(Clone)]
pub struct BorrowLogsRepository {
    pool: Pool<Postgres>,
}

impl BorrowLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List borrow logs, optionally filtered by user, newest first.
    ///
    /// Each row is enriched with its book via LEFT JOIN; a log whose book
    /// has been deleted still appears, with `book` set to None.
    pub async fn list(&self, user_id: Option<&str>) -> AppResult<Vec<BorrowLogDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.user_id, l.book_id, l.latitude, l.longitude,
                   l.borrow_date, l.return_date,
                   b.id as book_row_id, b.title, b.author
            FROM borrow_logs l
            LEFT JOIN books b ON b.id = l.book_id
            WHERE $1::text IS NULL OR l.user_id = $1
            ORDER BY l.borrow_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let book = row
                .get::<Option<i32>, _>("book_row_id")
                .map(|book_id| BookSummary {
                    id: book_id,
                    title: row.get("title"),
                    author: row.get("author"),
                });

            result.push(BorrowLogDetails {
                id: row.get("id"),
                user_id: row.get("user_id"),
                book_id: row.get("book_id"),
                latitude: row.get("latitude"),
                longitude: row.get("longitude"),
                borrow_date: row.get("borrow_date"),
                return_date: row.get("return_date"),
                book,
            });
        }

        Ok(result)
    }

    /// Borrow a book: decrement its stock and insert a log row, atomically.
    ///
    /// The book row is locked for the duration of the transaction, so two
    /// concurrent borrows of a book with stock 1 serialize: one succeeds,
    /// the other sees stock 0 and fails without underflowing.
    pub async fn borrow(&self, borrow: &CreateBorrow) -> AppResult<BorrowLog> {
        let mut tx = self.pool.begin().await?;

        let stock: Option<i32> =
            sqlx::query_scalar("SELECT stock FROM books WHERE id = $1 FOR UPDATE")
                .bind(borrow.book_id)
                .fetch_optional(&mut *tx)
                .await?;

        let stock = stock.ok_or_else(|| {
            AppError::NotFound(format!("Book with id {} not found", borrow.book_id))
        })?;

        if stock <= 0 {
            return Err(AppError::OutOfStock("Book is out of stock".to_string()));
        }

        sqlx::query("UPDATE books SET stock = stock - 1, updated_at = NOW() WHERE id = $1")
            .bind(borrow.book_id)
            .execute(&mut *tx)
            .await?;

        let log = sqlx::query_as::<_, BorrowLog>(
            r#"
            INSERT INTO borrow_logs (user_id, book_id, latitude, longitude, borrow_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, book_id, latitude, longitude, borrow_date, return_date
            "#,
        )
        .bind(&borrow.user_id)
        .bind(borrow.book_id)
        .bind(borrow.latitude)
        .bind(borrow.longitude)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Borrow created: log id={} user={} book={}",
            log.id,
            log.user_id,
            log.book_id
        );

        Ok(log)
    }

    /// Return a borrowed book: set the log's return date and increment the
    /// book's stock, atomically.
    ///
    /// The log row is locked first, so a concurrent double return cannot
    /// pass the return_date check twice. The stock increment is best-effort:
    /// if the book row was deleted in the meantime, the log update still
    /// commits.
    pub async fn return_borrow(&self, borrow_id: i32, user_id: &str) -> AppResult<BorrowLog> {
        let mut tx = self.pool.begin().await?;

        let log = sqlx::query_as::<_, BorrowLog>(
            "SELECT id, user_id, book_id, latitude, longitude, borrow_date, return_date \
             FROM borrow_logs WHERE id = $1 FOR UPDATE",
        )
        .bind(borrow_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Borrow record with id {} not found", borrow_id))
        })?;

        if log.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only return your own borrowed books".to_string(),
            ));
        }

        if log.return_date.is_some() {
            return Err(AppError::AlreadyReturned(
                "This book has already been returned".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, BorrowLog>(
            r#"
            UPDATE borrow_logs SET return_date = $1
            WHERE id = $2
            RETURNING id, user_id, book_id, latitude, longitude, borrow_date, return_date
            "#,
        )
        .bind(Utc::now())
        .bind(borrow_id)
        .fetch_one(&mut *tx)
        .await?;

        // Book may have been deleted since the loan was created.
        sqlx::query("UPDATE books SET stock = stock + 1, updated_at = NOW() WHERE id = $1")
            .bind(log.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Borrow returned: log id={} user={} book={}",
            updated.id,
            updated.user_id,
            updated.book_id
        );

        Ok(updated)
    }
}
