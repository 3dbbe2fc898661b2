//! Repository layer for database operations

pub mod books;
pub mod borrow_logs;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub borrow_logs: borrow_logs::BorrowLogsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            borrow_logs: borrow_logs::BorrowLogsRepository::new(pool.clone()),
            pool,
        }
    }
}
