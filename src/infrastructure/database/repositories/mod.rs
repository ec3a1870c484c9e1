//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod class_repository;
pub mod conditions;
mod db_error;
pub mod page_source;
pub mod report_repository;
pub mod repository_provider;
pub mod student_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
