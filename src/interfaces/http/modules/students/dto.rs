//! Student DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::students::{CreateStudent, UpdateStudent};
use crate::domain::student::{Student, StudentFilter};
use crate::interfaces::http::common::ApiError;
use crate::shared::query::params::{parse_number, text};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: i64,
    pub full_name: String,
    pub process_number: String,
    /// Gender label (`Indefinido` when unknown)
    pub gender: String,
    /// Status label
    pub status: String,
    pub status_code: i32,
    pub class_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub enrolled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentDto {
    fn from(s: Student) -> Self {
        Self {
            gender: s.gender_label().to_string(),
            status: s.status_label().to_string(),
            status_code: s.status,
            id: s.id,
            full_name: s.full_name,
            process_number: s.process_number,
            class_id: s.class_id,
            birth_date: s.birth_date,
            email: s.email,
            phone: s.phone,
            guardian_name: s.guardian_name,
            enrolled_at: s.enrolled_at,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 200, message = "full name is required (max 200 characters)"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 50, message = "process number is required (max 50 characters)"))]
    pub process_number: String,
    /// `Masculino` or `Feminino`
    pub gender: Option<String>,
    /// Status label, defaults to `Ativo`
    pub status: Option<String>,
    pub class_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub guardian_name: Option<String>,
    /// Defaults to now
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl From<CreateStudentRequest> for CreateStudent {
    fn from(r: CreateStudentRequest) -> Self {
        Self {
            full_name: r.full_name,
            process_number: r.process_number,
            gender: r.gender,
            status: r.status,
            class_id: r.class_id,
            birth_date: r.birth_date,
            email: r.email,
            phone: r.phone,
            guardian_name: r.guardian_name,
            enrolled_at: r.enrolled_at,
        }
    }
}

/// Every field optional; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 200, message = "full name must be 1-200 characters"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "process number must be 1-50 characters"))]
    pub process_number: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub class_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub guardian_name: Option<String>,
}

impl From<UpdateStudentRequest> for UpdateStudent {
    fn from(r: UpdateStudentRequest) -> Self {
        Self {
            full_name: r.full_name,
            process_number: r.process_number,
            gender: r.gender,
            status: r.status,
            class_id: r.class_id,
            birth_date: r.birth_date,
            email: r.email,
            phone: r.phone,
            guardian_name: r.guardian_name,
        }
    }
}

/// Student list filters. Unknown status/gender labels are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct StudentListParams {
    /// Matches name, process number or email
    pub search: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
    pub class_id: Option<String>,
    /// e.g. `2024/2025`
    pub academic_year: Option<String>,
}

impl StudentListParams {
    pub fn into_filter(self) -> Result<StudentFilter, ApiError> {
        Ok(StudentFilter {
            class_id: parse_number("classId", self.class_id.as_deref())?,
            search: text(self.search),
            status: text(self.status),
            gender: text(self.gender),
            academic_year: text(self.academic_year),
        })
    }
}
