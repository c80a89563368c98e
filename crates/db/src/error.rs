//! Error type for repository operations that enforce domain rules.
//!
//! Plain CRUD methods return `sqlx::Error` directly. Methods that validate
//! input or check lifecycle state inside a transaction return [`DbError`].

use agenda_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;
