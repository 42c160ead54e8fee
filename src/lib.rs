//! Lending Library Server
//!
//! Books, categories, users and loans behind a REST JSON API. The service
//! layer composes per-entity validation over PostgreSQL persistence and keeps
//! every book to at most one active loan.

use std::sync::Arc;

use sqlx::PgPool;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    /// Used by the readiness probe only
    pub pool: PgPool,
}
