//! # Escola Service
//!
//! School-management REST backend: students, classes, code tables and
//! paged, filterable student / academic / financial reports.
//!
//! ## Architecture
//!
//! - **domain**: entities, filter bags, code tables, repository traits
//! - **application**: use-case services called by the HTTP handlers
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: pagination, paged query resolver, errors, JSON helpers
//! - **server**: startup / shutdown of the whole service

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, resolve_config_path, AppConfig};
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::{create_api_router, AppState};
