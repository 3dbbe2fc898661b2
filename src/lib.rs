//! Bookloan Library Lending Service
//!
//! A Rust REST API server for a small lending library, managing a book
//! catalog and the borrow/return transactions against it.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
