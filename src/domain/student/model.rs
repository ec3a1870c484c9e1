//! Student domain entity

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::status::{GENDER, STUDENT_STATUS};

/// An enrolled (or formerly enrolled) student.
///
/// `status` and `gender` hold the stored integer codes; labels come from
/// the code tables in [`crate::domain::status`].
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    /// School-assigned enrolment number, unique
    pub process_number: String,
    pub gender: Option<i32>,
    pub status: i32,
    pub class_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub enrolled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn status_label(&self) -> &'static str {
        STUDENT_STATUS.label_of(self.status)
    }

    pub fn gender_label(&self) -> &'static str {
        GENDER.label_of_opt(self.gender)
    }
}

/// Data for a new student, codes already resolved.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub full_name: String,
    pub process_number: String,
    pub gender: Option<i32>,
    pub status: i32,
    pub class_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub full_name: Option<String>,
    pub process_number: Option<String>,
    pub gender: Option<i32>,
    pub status: Option<i32>,
    pub class_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.process_number.is_none()
            && self.gender.is_none()
            && self.status.is_none()
            && self.class_id.is_none()
            && self.birth_date.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.guardian_name.is_none()
    }
}

/// List filter. `status` and `gender` are labels (or numeric codes); values
/// the code tables do not know are ignored.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
    pub class_id: Option<i64>,
    pub academic_year: Option<String>,
}
