//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, extractors
//! - `modules`: one sub-module per resource (dto + handlers)
//! - `router`: shared state, OpenAPI document and route table

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
