//! Report row, summary and filter-option DTOs
//!
//! Rows never fail to project: missing text becomes `"N/A"`, missing
//! numbers become `0` and missing related objects become `null`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::report::{
    AcademicFilterOptions, AcademicSummary, ClassRef, EvaluationRecord, FinancialFilterOptions,
    FinancialSummary, NamedRef, PaymentRecord, StatusTotal, StudentFilterOptions, StudentRecord,
    StudentRef, PASSING_GRADE,
};
use crate::domain::status::{EVALUATION_KIND, GENDER, PAYMENT_STATUS, STUDENT_STATUS};
use crate::interfaces::http::modules::status_types::{code_labels, CodeLabelDto};

/// Placeholder for text the record does not have.
pub const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// JSON integer when it fits in `i64`, decimal string otherwise.
fn wide_integer(value: i128) -> Value {
    match i64::try_from(value) {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(value.to_string()),
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OptionDto {
    pub id: i64,
    pub name: String,
}

impl From<NamedRef> for OptionDto {
    fn from(r: NamedRef) -> Self {
        Self { id: r.id, name: r.name }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassOptionDto {
    pub id: i64,
    pub name: String,
    pub academic_year: String,
}

impl From<ClassRef> for ClassOptionDto {
    fn from(r: ClassRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
            academic_year: r.academic_year,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRefDto {
    pub id: i64,
    pub full_name: String,
    pub process_number: String,
}

impl From<StudentRef> for StudentRefDto {
    fn from(r: StudentRef) -> Self {
        Self {
            id: r.id,
            full_name: r.full_name,
            process_number: r.process_number,
        }
    }
}

// ── Student report ──────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentReportRowDto {
    pub id: i64,
    pub full_name: String,
    pub process_number: String,
    pub gender: String,
    pub status: String,
    pub class_name: String,
    pub academic_year: String,
    pub course: String,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub birth_date: Option<NaiveDate>,
    pub enrolled_at: DateTime<Utc>,
}

impl From<StudentRecord> for StudentReportRowDto {
    fn from(r: StudentRecord) -> Self {
        let s = r.student;
        let (class_name, academic_year) = match r.class {
            Some(c) => (c.name, c.academic_year),
            None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        };
        Self {
            gender: s.gender_label().to_string(),
            status: s.status_label().to_string(),
            id: s.id,
            full_name: s.full_name,
            process_number: s.process_number,
            class_name,
            academic_year,
            course: or_na(r.course.map(|c| c.name)),
            email: or_na(s.email),
            phone: or_na(s.phone),
            guardian_name: or_na(s.guardian_name),
            birth_date: s.birth_date,
            enrolled_at: s.enrolled_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilterOptionsDto {
    pub academic_years: Vec<String>,
    pub classes: Vec<ClassOptionDto>,
    pub courses: Vec<OptionDto>,
    pub statuses: Vec<CodeLabelDto>,
    pub genders: Vec<CodeLabelDto>,
}

impl From<StudentFilterOptions> for StudentFilterOptionsDto {
    fn from(o: StudentFilterOptions) -> Self {
        Self {
            academic_years: o.academic_years,
            classes: o.classes.into_iter().map(Into::into).collect(),
            courses: o.courses.into_iter().map(Into::into).collect(),
            statuses: code_labels(&STUDENT_STATUS),
            genders: code_labels(&GENDER),
        }
    }
}

// ── Academic report ─────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRowDto {
    pub id: i64,
    pub student_name: String,
    pub process_number: String,
    pub subject: String,
    pub class_name: String,
    pub academic_year: String,
    pub term: i32,
    pub kind: String,
    /// `0` when the evaluation has not been graded yet
    pub grade: f64,
    pub graded: bool,
    /// Graded at or above 10
    pub approved: bool,
    pub evaluated_at: DateTime<Utc>,
}

impl From<EvaluationRecord> for EvaluationRowDto {
    fn from(r: EvaluationRecord) -> Self {
        let e = r.evaluation;
        let (student_name, process_number) = match r.student {
            Some(s) => (s.full_name, s.process_number),
            None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        };
        let (class_name, academic_year) = match r.class {
            Some(c) => (c.name, c.academic_year),
            None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        };
        Self {
            id: e.id,
            student_name,
            process_number,
            subject: or_na(r.subject.map(|s| s.name)),
            class_name,
            academic_year,
            term: e.term,
            kind: EVALUATION_KIND.label_of(e.kind).to_string(),
            grade: e.grade.unwrap_or(0.0),
            graded: e.grade.is_some(),
            approved: e.grade.is_some_and(|g| g >= PASSING_GRADE),
            evaluated_at: e.evaluated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSummaryDto {
    pub total_evaluations: u64,
    pub graded_evaluations: u64,
    /// Two decimals; `0` when nothing is graded
    pub average_grade: f64,
    pub approved: u64,
    pub failed: u64,
    /// Percentage of graded evaluations that passed, two decimals
    pub approval_rate: f64,
}

impl From<AcademicSummary> for AcademicSummaryDto {
    fn from(s: AcademicSummary) -> Self {
        let approval_rate = if s.graded_evaluations == 0 {
            0.0
        } else {
            round2(s.approved as f64 * 100.0 / s.graded_evaluations as f64)
        };
        Self {
            total_evaluations: s.total_evaluations,
            graded_evaluations: s.graded_evaluations,
            average_grade: s.average_grade.map(round2).unwrap_or(0.0),
            approved: s.approved,
            failed: s.failed,
            approval_rate,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicFilterOptionsDto {
    pub academic_years: Vec<String>,
    pub classes: Vec<ClassOptionDto>,
    pub subjects: Vec<OptionDto>,
    pub terms: Vec<i32>,
    pub kinds: Vec<CodeLabelDto>,
}

impl From<AcademicFilterOptions> for AcademicFilterOptionsDto {
    fn from(o: AcademicFilterOptions) -> Self {
        Self {
            academic_years: o.academic_years,
            classes: o.classes.into_iter().map(Into::into).collect(),
            subjects: o.subjects.into_iter().map(Into::into).collect(),
            terms: o.terms,
            kinds: code_labels(&EVALUATION_KIND),
        }
    }
}

// ── Financial report ────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRowDto {
    pub id: i64,
    pub reference: String,
    pub description: String,
    /// `null` for payments recorded without a student
    pub student: Option<StudentRefDto>,
    /// Minor currency units
    pub amount: i64,
    pub status: String,
    pub method: String,
    pub due_date: NaiveDate,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<PaymentRecord> for PaymentRowDto {
    fn from(r: PaymentRecord) -> Self {
        let p = r.payment;
        Self {
            id: p.id,
            reference: p.reference,
            description: or_na(p.description),
            student: r.student.map(Into::into),
            amount: p.amount,
            status: PAYMENT_STATUS.label_of(p.status).to_string(),
            method: or_na(p.method),
            due_date: p.due_date,
            paid_at: p.paid_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotalDto {
    pub status: String,
    pub status_code: i32,
    pub count: u64,
    pub amount: i64,
}

impl From<StatusTotal> for StatusTotalDto {
    fn from(t: StatusTotal) -> Self {
        Self {
            status: PAYMENT_STATUS.label_of(t.status).to_string(),
            status_code: t.status,
            count: t.count,
            amount: t.amount,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummaryDto {
    pub total_payments: u64,
    /// Minor currency units; a string once past the safe integer range
    #[schema(value_type = String, example = "50000")]
    pub total_amount: Value,
    pub by_status: Vec<StatusTotalDto>,
}

impl From<FinancialSummary> for FinancialSummaryDto {
    fn from(s: FinancialSummary) -> Self {
        Self {
            total_payments: s.total_payments,
            total_amount: wide_integer(s.total_amount),
            by_status: s.by_status.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinancialFilterOptionsDto {
    pub statuses: Vec<CodeLabelDto>,
    pub methods: Vec<String>,
}

impl From<FinancialFilterOptions> for FinancialFilterOptionsDto {
    fn from(o: FinancialFilterOptions) -> Self {
        Self {
            statuses: code_labels(&PAYMENT_STATUS),
            methods: o.methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{Evaluation, Payment};
    use crate::domain::student::Student;
    use chrono::TimeZone;

    fn student() -> Student {
        let at = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap();
        Student {
            id: 7,
            full_name: "Ana Silva".into(),
            process_number: "P-001".into(),
            gender: None,
            status: 99,
            class_id: None,
            birth_date: None,
            email: Some("  ".into()),
            phone: None,
            guardian_name: Some("Maria Silva".into()),
            enrolled_at: at,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn student_row_falls_back_for_missing_values() {
        let row = StudentReportRowDto::from(StudentRecord {
            student: student(),
            class: None,
            course: None,
        });
        assert_eq!(row.status, "Indefinido");
        assert_eq!(row.gender, "Indefinido");
        assert_eq!(row.class_name, NOT_AVAILABLE);
        assert_eq!(row.course, NOT_AVAILABLE);
        assert_eq!(row.email, NOT_AVAILABLE);
        assert_eq!(row.guardian_name, "Maria Silva");

        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("classId").is_none());
        assert!(json["birthDate"].is_null());
    }

    #[test]
    fn ungraded_evaluation_reports_zero() {
        let row = EvaluationRowDto::from(EvaluationRecord {
            evaluation: Evaluation {
                id: 1,
                student_id: 7,
                subject_id: None,
                class_id: None,
                term: 2,
                kind: 3,
                grade: None,
                evaluated_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            },
            student: None,
            subject: None,
            class: None,
        });
        assert_eq!(row.grade, 0.0);
        assert!(!row.graded);
        assert!(!row.approved);
        assert_eq!(row.kind, "Exame");
        assert_eq!(row.student_name, NOT_AVAILABLE);
    }

    #[test]
    fn legacy_payment_has_null_student() {
        let row = PaymentRowDto::from(PaymentRecord {
            payment: Payment {
                id: 3,
                student_id: None,
                reference: "REF-3".into(),
                description: None,
                amount: 15_000,
                status: 2,
                method: None,
                due_date: NaiveDate::from_ymd_opt(2024, 10, 10).unwrap(),
                paid_at: None,
            },
            student: None,
        });
        let json = serde_json::to_value(&row).unwrap();
        assert!(json["student"].is_null());
        assert_eq!(json["status"], "Pendente");
        assert_eq!(json["method"], NOT_AVAILABLE);
        assert_eq!(json["dueDate"], "2024-10-10");
    }

    #[test]
    fn summary_rounds_to_two_decimals() {
        let dto = AcademicSummaryDto::from(AcademicSummary {
            total_evaluations: 4,
            graded_evaluations: 3,
            average_grade: Some(12.666_666),
            approved: 2,
            failed: 1,
        });
        assert_eq!(dto.average_grade, 12.67);
        assert_eq!(dto.approval_rate, 66.67);

        let empty = AcademicSummaryDto::from(AcademicSummary::default());
        assert_eq!(empty.average_grade, 0.0);
        assert_eq!(empty.approval_rate, 0.0);
    }

    #[test]
    fn financial_total_beyond_i64_is_a_string() {
        let summary = |total_amount: i128| FinancialSummary {
            total_payments: 2,
            total_amount,
            by_status: Vec::new(),
        };
        let small = FinancialSummaryDto::from(summary(50_000));
        assert_eq!(small.total_amount, serde_json::json!(50_000));

        let big = FinancialSummaryDto::from(summary(10_000_000_000_000_000_000));
        assert_eq!(big.total_amount, "10000000000000000000");
    }
}
