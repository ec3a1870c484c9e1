//! Student use-cases

mod service;

pub use service::{CreateStudent, StudentService, UpdateStudent};
