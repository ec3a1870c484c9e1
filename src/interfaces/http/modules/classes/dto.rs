//! Class DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::classes::{CreateClass, UpdateClass};
use crate::domain::school_class::{ClassFilter, SchoolClass};
use crate::interfaces::http::common::ApiError;
use crate::shared::query::params::{parse_number, text};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassDto {
    pub id: i64,
    pub name: String,
    pub academic_year: String,
    pub course_id: Option<i64>,
    pub shift: Option<String>,
    pub room: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SchoolClass> for ClassDto {
    fn from(c: SchoolClass) -> Self {
        Self {
            id: c.id,
            name: c.name,
            academic_year: c.academic_year,
            course_id: c.course_id,
            shift: c.shift,
            room: c.room,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 50, message = "class name is required (max 50 characters)"))]
    pub name: String,
    /// `YYYY/YYYY`, e.g. `2024/2025`
    #[validate(length(equal = 9, message = "academic year must look like 2024/2025"))]
    pub academic_year: String,
    pub course_id: Option<i64>,
    /// `Manhã`, `Tarde` or `Noite`
    pub shift: Option<String>,
    #[validate(length(max = 50))]
    pub room: Option<String>,
}

impl From<CreateClassRequest> for CreateClass {
    fn from(r: CreateClassRequest) -> Self {
        Self {
            name: r.name,
            academic_year: r.academic_year,
            course_id: r.course_id,
            shift: r.shift,
            room: r.room,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, max = 50, message = "class name must be 1-50 characters"))]
    pub name: Option<String>,
    #[validate(length(equal = 9, message = "academic year must look like 2024/2025"))]
    pub academic_year: Option<String>,
    pub course_id: Option<i64>,
    pub shift: Option<String>,
    #[validate(length(max = 50))]
    pub room: Option<String>,
}

impl From<UpdateClassRequest> for UpdateClass {
    fn from(r: UpdateClassRequest) -> Self {
        Self {
            name: r.name,
            academic_year: r.academic_year,
            course_id: r.course_id,
            shift: r.shift,
            room: r.room,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ClassListParams {
    /// Matches name or room
    pub search: Option<String>,
    pub academic_year: Option<String>,
    pub course_id: Option<String>,
    pub shift: Option<String>,
}

impl ClassListParams {
    pub fn into_filter(self) -> Result<ClassFilter, ApiError> {
        Ok(ClassFilter {
            course_id: parse_number("courseId", self.course_id.as_deref())?,
            search: text(self.search),
            academic_year: text(self.academic_year),
            shift: text(self.shift),
        })
    }
}
