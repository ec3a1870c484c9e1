//! Read-only report models
//!
//! Reports join students, classes, courses, subjects, evaluations and
//! payments. Nothing here is written through the API.

pub mod filters;
pub mod records;
pub mod repository;

pub use filters::{AcademicReportFilter, FinancialReportFilter, StudentReportFilter};
pub use records::{
    AcademicFilterOptions, AcademicSummary, ClassRef, Evaluation, EvaluationRecord,
    FinancialFilterOptions, FinancialSummary, NamedRef, Payment, PaymentRecord, StatusTotal,
    StudentFilterOptions, StudentRecord, StudentRef, PASSING_GRADE,
};
pub use repository::ReportRepository;
