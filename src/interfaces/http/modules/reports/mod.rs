//! Reports module — student, academic and financial reports
//!
//! Read-only. Every report shares the paging contract of the list
//! endpoints and has a `filter-options` companion fed from the tables.

pub mod dto;
pub mod handlers;
pub mod params;

pub use dto::*;
pub use handlers::*;
pub use params::*;
