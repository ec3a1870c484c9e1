//! Report query parameters
//!
//! Raw strings in, typed filter bags out. Blank values are absent and a
//! value that does not parse fails with the parameter's name.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::report::{AcademicReportFilter, FinancialReportFilter, StudentReportFilter};
use crate::interfaces::http::common::ApiError;
use crate::shared::query::params::{
    parse_date, parse_date_bound, parse_decimal, parse_number, text, RangeBound,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct StudentReportParams {
    /// Matches name, process number or email
    pub search: Option<String>,
    /// Status label, e.g. `Ativo`
    pub status: Option<String>,
    pub gender: Option<String>,
    pub class_id: Option<String>,
    pub course_id: Option<String>,
    pub academic_year: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339
    pub enrolled_from: Option<String>,
    /// `YYYY-MM-DD` (whole day included) or RFC 3339
    pub enrolled_to: Option<String>,
}

impl StudentReportParams {
    pub fn into_filter(self) -> Result<StudentReportFilter, ApiError> {
        Ok(StudentReportFilter {
            class_id: parse_number("classId", self.class_id.as_deref())?,
            course_id: parse_number("courseId", self.course_id.as_deref())?,
            enrolled_from: parse_date_bound(
                "enrolledFrom",
                self.enrolled_from.as_deref(),
                RangeBound::Start,
            )?,
            enrolled_to: parse_date_bound(
                "enrolledTo",
                self.enrolled_to.as_deref(),
                RangeBound::End,
            )?,
            search: text(self.search),
            status: text(self.status),
            gender: text(self.gender),
            academic_year: text(self.academic_year),
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AcademicReportParams {
    /// Matches the student's name or process number
    pub search: Option<String>,
    pub subject_id: Option<String>,
    pub class_id: Option<String>,
    /// 1, 2 or 3
    pub term: Option<String>,
    /// Evaluation kind label, e.g. `Prova`
    pub kind: Option<String>,
    pub academic_year: Option<String>,
    pub min_grade: Option<String>,
    pub max_grade: Option<String>,
    /// Evaluated on or after
    pub from: Option<String>,
    /// Evaluated on or before
    pub to: Option<String>,
}

impl AcademicReportParams {
    pub fn into_filter(self) -> Result<AcademicReportFilter, ApiError> {
        Ok(AcademicReportFilter {
            subject_id: parse_number("subjectId", self.subject_id.as_deref())?,
            class_id: parse_number("classId", self.class_id.as_deref())?,
            term: parse_number("term", self.term.as_deref())?,
            min_grade: parse_decimal("minGrade", self.min_grade.as_deref())?,
            max_grade: parse_decimal("maxGrade", self.max_grade.as_deref())?,
            from: parse_date_bound("from", self.from.as_deref(), RangeBound::Start)?,
            to: parse_date_bound("to", self.to.as_deref(), RangeBound::End)?,
            search: text(self.search),
            kind: text(self.kind),
            academic_year: text(self.academic_year),
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct FinancialReportParams {
    /// Matches reference, description or payer name
    pub search: Option<String>,
    /// Payment status label, e.g. `Pendente`
    pub status: Option<String>,
    pub method: Option<String>,
    /// Minor currency units
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    /// Due on or after (`YYYY-MM-DD`)
    pub from: Option<String>,
    /// Due on or before (`YYYY-MM-DD`)
    pub to: Option<String>,
}

impl FinancialReportParams {
    pub fn into_filter(self) -> Result<FinancialReportFilter, ApiError> {
        Ok(FinancialReportFilter {
            min_amount: parse_number("minAmount", self.min_amount.as_deref())?,
            max_amount: parse_number("maxAmount", self.max_amount.as_deref())?,
            from: parse_date("from", self.from.as_deref())?,
            to: parse_date("to", self.to.as_deref())?,
            search: text(self.search),
            status: text(self.status),
            method: text(self.method),
        })
    }
}
