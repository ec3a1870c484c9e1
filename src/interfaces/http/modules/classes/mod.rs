//! Classes module — class (turma) CRUD

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
