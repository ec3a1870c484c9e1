//! Class aggregate

pub mod model;
pub mod repository;

pub use model::{canonical_shift, ClassChanges, ClassFilter, NewClass, SchoolClass, SHIFTS};
pub use repository::ClassRepository;
