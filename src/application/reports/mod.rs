//! Report use-cases

mod service;

pub use service::ReportService;
