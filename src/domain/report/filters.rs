//! Typed filter bags for the report queries
//!
//! Every field is independent and optional; set fields are combined with
//! AND. Enumerated fields keep the caller's label so that unknown labels
//! can be dropped when the query is built.

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Default)]
pub struct StudentReportFilter {
    /// Matches full name, process number or email
    pub search: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
    pub class_id: Option<i64>,
    pub course_id: Option<i64>,
    pub academic_year: Option<String>,
    pub enrolled_from: Option<DateTime<Utc>>,
    pub enrolled_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct AcademicReportFilter {
    /// Matches the student's name or process number
    pub search: Option<String>,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub term: Option<i32>,
    pub kind: Option<String>,
    /// Academic year of the evaluated class
    pub academic_year: Option<String>,
    pub min_grade: Option<f64>,
    pub max_grade: Option<f64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// `from`/`to` bound the due date, both inclusive.
#[derive(Debug, Clone, Default)]
pub struct FinancialReportFilter {
    /// Matches reference, description or the payer's name
    pub search: Option<String>,
    pub status: Option<String>,
    pub method: Option<String>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
