//! Application layer - use-case orchestration
//!
//! HTTP handlers stay thin and delegate to these services.

pub mod classes;
pub mod reports;
pub mod students;

pub use classes::ClassService;
pub use reports::ReportService;
pub use students::StudentService;
