//! `DbErr` -> `DomainError` conversion shared by the repositories

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Like [`db_err`], but a unique-constraint violation becomes a `Conflict`
/// carrying `conflict_message`.
pub(crate) fn write_err(e: DbErr, conflict_message: impl FnOnce() -> String) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(conflict_message()),
        _ => db_err(e),
    }
}
