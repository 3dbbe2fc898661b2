//! Data models for Bookloan

pub mod book;
pub mod borrow_log;

// Re-export commonly used types
pub use book::{Book, BookSummary, CreateBook, UpdateBook};
pub use borrow_log::{BorrowLog, BorrowLogDetails, CreateBorrow};
