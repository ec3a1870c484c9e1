//! Class use-cases

mod service;

pub use service::{ClassService, CreateClass, UpdateClass};
