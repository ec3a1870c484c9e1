//! Student management service
//!
//! HTTP handlers are thin wrappers that delegate here. Write paths resolve
//! labels strictly (unknown labels are rejected), while list filters drop
//! unknown labels.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::domain::status::{require_code, ACTIVE_STUDENT, GENDER, STUDENT_STATUS};
use crate::domain::student::{NewStudent, Student, StudentChanges, StudentFilter};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::types::{PageEnvelope, PageRequest};

/// Input for registering a student. Status and gender are labels.
#[derive(Debug, Clone, Default)]
pub struct CreateStudent {
    pub full_name: String,
    pub process_number: String,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub class_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub enrolled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateStudent {
    pub full_name: Option<String>,
    pub process_number: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub class_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
}

pub struct StudentService {
    repos: Arc<dyn RepositoryProvider>,
}

fn required(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_birth_date(birth_date: Option<NaiveDate>) -> DomainResult<()> {
    match birth_date {
        Some(date) if date > Utc::now().date_naive() => Err(DomainError::validation(
            "birth_date must not be in the future",
        )),
        _ => Ok(()),
    }
}

impl StudentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(
        &self,
        filter: StudentFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<Student>> {
        self.repos.students().list(&filter, page).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Student> {
        self.repos
            .students()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", "id", id))
    }

    pub async fn create(&self, input: CreateStudent) -> DomainResult<Student> {
        let full_name = required("full_name", &input.full_name)?;
        let process_number = required("process_number", &input.process_number)?;
        let status = match input.status.as_deref() {
            Some(label) => require_code(&STUDENT_STATUS, "status", label)?,
            None => ACTIVE_STUDENT,
        };
        let gender = input
            .gender
            .as_deref()
            .map(|label| require_code(&GENDER, "gender", label))
            .transpose()?;
        check_birth_date(input.birth_date)?;
        if let Some(class_id) = input.class_id {
            self.ensure_class_exists(class_id).await?;
        }

        if self
            .repos
            .students()
            .find_by_process_number(&process_number)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "A student with process number '{}' already exists",
                process_number
            )));
        }

        let student = self
            .repos
            .students()
            .create(NewStudent {
                full_name,
                process_number,
                gender,
                status,
                class_id: input.class_id,
                birth_date: input.birth_date,
                email: optional_text(input.email),
                phone: optional_text(input.phone),
                guardian_name: optional_text(input.guardian_name),
                enrolled_at: input.enrolled_at.unwrap_or_else(Utc::now),
            })
            .await?;

        info!(student_id = student.id, process_number = %student.process_number, "Student registered");
        Ok(student)
    }

    pub async fn update(&self, id: i64, input: UpdateStudent) -> DomainResult<Student> {
        let current = self.get(id).await?;

        let process_number = input
            .process_number
            .as_deref()
            .map(|v| required("process_number", v))
            .transpose()?;
        if let Some(number) = process_number.as_deref() {
            if number != current.process_number {
                let taken = self.repos.students().find_by_process_number(number).await?;
                if taken.is_some_and(|other| other.id != id) {
                    return Err(DomainError::Conflict(format!(
                        "A student with process number '{}' already exists",
                        number
                    )));
                }
            }
        }
        if let Some(class_id) = input.class_id {
            self.ensure_class_exists(class_id).await?;
        }
        check_birth_date(input.birth_date)?;

        let changes = StudentChanges {
            full_name: input
                .full_name
                .as_deref()
                .map(|v| required("full_name", v))
                .transpose()?,
            process_number,
            gender: input
                .gender
                .as_deref()
                .map(|label| require_code(&GENDER, "gender", label))
                .transpose()?,
            status: input
                .status
                .as_deref()
                .map(|label| require_code(&STUDENT_STATUS, "status", label))
                .transpose()?,
            class_id: input.class_id,
            birth_date: input.birth_date,
            email: optional_text(input.email),
            phone: optional_text(input.phone),
            guardian_name: optional_text(input.guardian_name),
        };

        self.repos
            .students()
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", "id", id))
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.repos.students().delete(id).await? {
            return Err(DomainError::not_found("Student", "id", id));
        }
        info!(student_id = id, "Student deleted");
        Ok(())
    }

    async fn ensure_class_exists(&self, class_id: i64) -> DomainResult<()> {
        if self.repos.classes().find_by_id(class_id).await?.is_none() {
            return Err(DomainError::validation(format!(
                "class_id {} does not exist",
                class_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn service() -> StudentService {
        StudentService::new(Arc::new(SeaOrmRepositoryProvider::new(test_database().await)))
    }

    fn input(name: &str, number: &str) -> CreateStudent {
        CreateStudent {
            full_name: name.into(),
            process_number: number.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn status_defaults_to_active() {
        let svc = service().await;
        let student = svc.create(input("  Ana Silva ", "P-1")).await.unwrap();
        assert_eq!(student.full_name, "Ana Silva");
        assert_eq!(student.status_label(), "Ativo");
        assert_eq!(student.gender_label(), "Indefinido");
    }

    #[tokio::test]
    async fn unknown_labels_are_rejected_on_write() {
        let svc = service().await;
        let err = svc
            .create(CreateStudent {
                status: Some("Expulso".into()),
                ..input("Ana", "P-1")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_name_and_missing_class_are_rejected() {
        let svc = service().await;
        assert!(matches!(
            svc.create(input("   ", "P-1")).await,
            Err(DomainError::Validation(_))
        ));
        let err = svc
            .create(CreateStudent {
                class_id: Some(42),
                ..input("Ana", "P-1")
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "class_id 42 does not exist");
    }

    #[tokio::test]
    async fn duplicate_process_number_conflicts() {
        let svc = service().await;
        svc.create(input("Ana", "P-1")).await.unwrap();
        let other = svc.create(input("Rui", "P-2")).await.unwrap();

        assert!(matches!(
            svc.create(input("Rui", "P-1")).await,
            Err(DomainError::Conflict(_))
        ));
        let err = svc
            .update(
                other.id,
                UpdateStudent {
                    process_number: Some("P-1".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_keeps_unchanged_fields() {
        let svc = service().await;
        let ana = svc
            .create(CreateStudent {
                gender: Some("Feminino".into()),
                ..input("Ana", "P-1")
            })
            .await
            .unwrap();

        let updated = svc
            .update(
                ana.id,
                UpdateStudent {
                    status: Some("transferido".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status_label(), "Transferido");
        assert_eq!(updated.gender_label(), "Feminino");
        assert_eq!(updated.process_number, "P-1");
    }

    #[tokio::test]
    async fn missing_students_are_not_found() {
        let svc = service().await;
        assert!(matches!(svc.get(7).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.delete(7).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(
            svc.update(7, UpdateStudent::default()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
