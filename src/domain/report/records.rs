//! Report rows, summaries and filter options

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::student::Student;

/// Grades are on a 0-20 scale; a grade at or above this passes.
pub const PASSING_GRADE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRef {
    pub id: i64,
    pub name: String,
    pub academic_year: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRef {
    pub id: i64,
    pub full_name: String,
    pub process_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub term: i32,
    pub kind: i32,
    pub grade: Option<f64>,
    pub evaluated_at: DateTime<Utc>,
}

/// Amounts are integer minor currency units.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    /// `None` for rows imported without a payer
    pub student_id: Option<i64>,
    pub reference: String,
    pub description: Option<String>,
    pub amount: i64,
    pub status: i32,
    pub method: Option<String>,
    pub due_date: NaiveDate,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub student: Student,
    pub class: Option<ClassRef>,
    pub course: Option<NamedRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    pub evaluation: Evaluation,
    pub student: Option<StudentRef>,
    pub subject: Option<NamedRef>,
    pub class: Option<ClassRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub payment: Payment,
    pub student: Option<StudentRef>,
}

/// Aggregates over the evaluations matching an academic filter.
///
/// `approved` and `failed` only count graded evaluations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcademicSummary {
    pub total_evaluations: u64,
    pub graded_evaluations: u64,
    pub average_grade: Option<f64>,
    pub approved: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTotal {
    pub status: i32,
    pub count: u64,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinancialSummary {
    pub total_payments: u64,
    /// Sum across statuses; wider than a single column total
    pub total_amount: i128,
    /// One entry per status present in the result, ordered by code
    pub by_status: Vec<StatusTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentFilterOptions {
    pub academic_years: Vec<String>,
    pub classes: Vec<ClassRef>,
    pub courses: Vec<NamedRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AcademicFilterOptions {
    pub academic_years: Vec<String>,
    pub classes: Vec<ClassRef>,
    pub subjects: Vec<NamedRef>,
    pub terms: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinancialFilterOptions {
    pub methods: Vec<String>,
}
