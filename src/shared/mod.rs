//! Cross-cutting building blocks shared by every layer
//!
//! - `types`: error taxonomy, pagination primitives and the label codec
//! - `query`: raw query-string parsing and the paged query resolver
//! - `json`: response tree walk that keeps 64-bit integers safe for JSON clients
//! - `shutdown`: graceful shutdown coordination

pub mod json;
pub mod query;
pub mod shutdown;
pub mod types;

pub use types::*;
