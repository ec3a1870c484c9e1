//! Student aggregate
//!
//! Contains the Student entity, its write models, the list filter and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{NewStudent, Student, StudentChanges, StudentFilter};
pub use repository::StudentRepository;
