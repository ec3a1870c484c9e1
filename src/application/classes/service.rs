//! Class management service

use std::sync::Arc;

use tracing::info;

use crate::domain::school_class::{
    canonical_shift, ClassChanges, ClassFilter, NewClass, SchoolClass, SHIFTS,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::types::{PageEnvelope, PageRequest};

#[derive(Debug, Clone, Default)]
pub struct CreateClass {
    pub name: String,
    pub academic_year: String,
    pub course_id: Option<i64>,
    pub shift: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClass {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub course_id: Option<i64>,
    pub shift: Option<String>,
    pub room: Option<String>,
}

pub struct ClassService {
    repos: Arc<dyn RepositoryProvider>,
}

/// `YYYY/YYYY` with consecutive years, e.g. `2024/2025`.
fn validate_academic_year(value: &str) -> DomainResult<String> {
    let value = value.trim();
    let valid = value
        .split_once('/')
        .and_then(|(start, end)| {
            if start.len() != 4 || end.len() != 4 {
                return None;
            }
            Some((start.parse::<u32>().ok()?, end.parse::<u32>().ok()?))
        })
        .is_some_and(|(start, end)| end == start + 1);

    if !valid {
        return Err(DomainError::validation(format!(
            "academic_year must look like 2024/2025, got '{}'",
            value
        )));
    }
    Ok(value.to_string())
}

fn validate_name(value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation("name must not be empty"));
    }
    Ok(value.to_string())
}

fn validate_shift(value: &str) -> DomainResult<String> {
    canonical_shift(value).map(str::to_string).ok_or_else(|| {
        DomainError::validation(format!(
            "shift must be one of {}, got '{}'",
            SHIFTS.join(", "),
            value.trim()
        ))
    })
}

impl ClassService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(
        &self,
        filter: ClassFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<SchoolClass>> {
        self.repos.classes().list(&filter, page).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<SchoolClass> {
        self.repos
            .classes()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Class", "id", id))
    }

    pub async fn create(&self, input: CreateClass) -> DomainResult<SchoolClass> {
        let name = validate_name(&input.name)?;
        let academic_year = validate_academic_year(&input.academic_year)?;
        let shift = input.shift.as_deref().map(validate_shift).transpose()?;
        if let Some(course_id) = input.course_id {
            self.ensure_course_exists(course_id).await?;
        }

        self.ensure_unique(&name, &academic_year, None).await?;

        let class = self
            .repos
            .classes()
            .create(NewClass {
                name,
                academic_year,
                course_id: input.course_id,
                shift,
                room: input
                    .room
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty()),
            })
            .await?;

        info!(class_id = class.id, name = %class.name, year = %class.academic_year, "Class created");
        Ok(class)
    }

    pub async fn update(&self, id: i64, input: UpdateClass) -> DomainResult<SchoolClass> {
        let current = self.get(id).await?;

        let name = input.name.as_deref().map(validate_name).transpose()?;
        let academic_year = input
            .academic_year
            .as_deref()
            .map(validate_academic_year)
            .transpose()?;
        let shift = input.shift.as_deref().map(validate_shift).transpose()?;
        if let Some(course_id) = input.course_id {
            self.ensure_course_exists(course_id).await?;
        }

        if name.is_some() || academic_year.is_some() {
            self.ensure_unique(
                name.as_deref().unwrap_or(&current.name),
                academic_year.as_deref().unwrap_or(&current.academic_year),
                Some(id),
            )
            .await?;
        }

        let changes = ClassChanges {
            name,
            academic_year,
            course_id: input.course_id,
            shift,
            room: input
                .room
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        };

        self.repos
            .classes()
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Class", "id", id))
    }

    /// Students of a deleted class keep their record with no class.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.repos.classes().delete(id).await? {
            return Err(DomainError::not_found("Class", "id", id));
        }
        info!(class_id = id, "Class deleted");
        Ok(())
    }

    async fn ensure_course_exists(&self, course_id: i64) -> DomainResult<()> {
        if !self.repos.classes().course_exists(course_id).await? {
            return Err(DomainError::validation(format!(
                "course_id {} does not exist",
                course_id
            )));
        }
        Ok(())
    }

    async fn ensure_unique(
        &self,
        name: &str,
        academic_year: &str,
        except: Option<i64>,
    ) -> DomainResult<()> {
        let existing = self
            .repos
            .classes()
            .find_by_name_and_year(name, academic_year)
            .await?;
        match existing {
            Some(class) if Some(class.id) != except => Err(DomainError::Conflict(format!(
                "Class '{}' already exists for academic year {}",
                name, academic_year
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn service() -> ClassService {
        ClassService::new(Arc::new(SeaOrmRepositoryProvider::new(test_database().await)))
    }

    fn input(name: &str, year: &str) -> CreateClass {
        CreateClass {
            name: name.into(),
            academic_year: year.into(),
            ..Default::default()
        }
    }

    #[test]
    fn academic_year_format() {
        assert!(validate_academic_year("2024/2025").is_ok());
        assert!(validate_academic_year(" 2024/2025 ").is_ok());
        assert!(validate_academic_year("2024/2026").is_err());
        assert!(validate_academic_year("2024-2025").is_err());
        assert!(validate_academic_year("24/25").is_err());
    }

    #[tokio::test]
    async fn shift_is_normalised() {
        let svc = service().await;
        let class = svc
            .create(CreateClass {
                shift: Some("noite".into()),
                ..input("12A", "2024/2025")
            })
            .await
            .unwrap();
        assert_eq!(class.shift.as_deref(), Some("Noite"));

        let err = svc
            .create(CreateClass {
                shift: Some("Madrugada".into()),
                ..input("12B", "2024/2025")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn renaming_onto_an_existing_class_conflicts() {
        let svc = service().await;
        svc.create(input("10A", "2024/2025")).await.unwrap();
        let b = svc.create(input("10B", "2024/2025")).await.unwrap();

        let err = svc
            .update(
                b.id,
                UpdateClass {
                    name: Some("10A".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let same = svc
            .update(
                b.id,
                UpdateClass {
                    name: Some("10B".into()),
                    room: Some("Sala 3".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.room.as_deref(), Some("Sala 3"));
    }

    #[tokio::test]
    async fn unknown_course_is_rejected() {
        let svc = service().await;
        let err = svc
            .create(CreateClass {
                course_id: Some(9),
                ..input("10A", "2024/2025")
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "course_id 9 does not exist");
    }

    #[tokio::test]
    async fn delete_missing_class_is_not_found() {
        let svc = service().await;
        assert!(matches!(
            svc.delete(1).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
