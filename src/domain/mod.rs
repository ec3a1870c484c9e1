//! Domain layer
//!
//! Aggregates (students, classes), the read-only report models, the label
//! codecs for every stored enumeration, and the repository interfaces the
//! infrastructure layer implements.

pub mod report;
pub mod repositories;
pub mod school_class;
pub mod status;
pub mod student;

pub use repositories::RepositoryProvider;
pub use school_class::{ClassFilter, ClassRepository, SchoolClass};
pub use student::{Student, StudentFilter, StudentRepository};

pub use crate::shared::types::{DomainError, DomainResult};
