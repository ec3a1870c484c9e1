//! Liveness / database health endpoint

pub mod handlers;

pub use handlers::*;
