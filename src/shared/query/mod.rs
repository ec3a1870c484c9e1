//! Paged, filterable queries
//!
//! `params` turns raw query-string values into typed filter fields,
//! `resolver` runs the count/fetch pair behind a [`PageSource`] and builds
//! the page envelope.

pub mod params;
pub mod resolver;

pub use resolver::{resolve_page, PageSource};
