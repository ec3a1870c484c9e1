//! SeaORM implementation of StudentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::conditions::ConditionBuilder;
use super::db_error::{db_err, write_err};
use super::page_source::SelectSource;
use crate::domain::status::{GENDER, STUDENT_STATUS};
use crate::domain::student::{
    NewStudent, Student, StudentChanges, StudentFilter, StudentRepository,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{school_class, student};
use crate::shared::query::resolve_page;
use crate::shared::types::{PageEnvelope, PageRequest};

pub struct SeaOrmStudentRepository {
    db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn student_model_to_domain(model: student::Model) -> Student {
    Student {
        id: model.id,
        full_name: model.full_name,
        process_number: model.process_number,
        gender: model.gender,
        status: model.status,
        class_id: model.class_id,
        birth_date: model.birth_date,
        email: model.email,
        phone: model.phone,
        guardian_name: model.guardian_name,
        enrolled_at: model.enrolled_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Clauses shared by the student list and the student report.
pub(crate) fn student_conditions(
    search: Option<&str>,
    status: Option<&str>,
    gender: Option<&str>,
    class_id: Option<i64>,
    academic_year: Option<&str>,
) -> ConditionBuilder {
    ConditionBuilder::new()
        .search(
            &[
                student::Column::FullName,
                student::Column::ProcessNumber,
                student::Column::Email,
            ],
            search,
        )
        .mapped(student::Column::Status, &STUDENT_STATUS, status)
        .mapped(student::Column::Gender, &GENDER, gender)
        .eq(student::Column::ClassId, class_id)
        .add_opt(academic_year, |year| {
            student::Column::ClassId.in_subquery(
                Query::select()
                    .column(school_class::Column::Id)
                    .from(school_class::Entity)
                    .and_where(school_class::Column::AcademicYear.eq(year))
                    .to_owned(),
            )
        })
}

fn duplicate_process_number(process_number: &str) -> String {
    format!(
        "A student with process number '{}' already exists",
        process_number
    )
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn list(
        &self,
        filter: &StudentFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<Student>> {
        let condition = student_conditions(
            filter.search.as_deref(),
            filter.status.as_deref(),
            filter.gender.as_deref(),
            filter.class_id,
            filter.academic_year.as_deref(),
        )
        .build();

        let select = student::Entity::find()
            .filter(condition)
            .order_by_asc(student::Column::FullName)
            .order_by_asc(student::Column::Id);

        let page = resolve_page("students", &SelectSource::new(&self.db, select), page).await?;
        Ok(page.map(student_model_to_domain))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Student>> {
        let model = student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(student_model_to_domain))
    }

    async fn find_by_process_number(&self, process_number: &str) -> DomainResult<Option<Student>> {
        let model = student::Entity::find()
            .filter(student::Column::ProcessNumber.eq(process_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(student_model_to_domain))
    }

    async fn create(&self, new: NewStudent) -> DomainResult<Student> {
        let now = Utc::now();
        let process_number = new.process_number.clone();

        let active = student::ActiveModel {
            full_name: Set(new.full_name),
            process_number: Set(new.process_number),
            gender: Set(new.gender),
            status: Set(new.status),
            class_id: Set(new.class_id),
            birth_date: Set(new.birth_date),
            email: Set(new.email),
            phone: Set(new.phone),
            guardian_name: Set(new.guardian_name),
            enrolled_at: Set(new.enrolled_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, || duplicate_process_number(&process_number)))?;

        debug!(student_id = model.id, "Student created");
        Ok(student_model_to_domain(model))
    }

    async fn update(&self, id: i64, changes: StudentChanges) -> DomainResult<Option<Student>> {
        let Some(model) = student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: student::ActiveModel = model.into();
        let process_number = changes.process_number.clone().unwrap_or_default();

        if let Some(v) = changes.full_name {
            active.full_name = Set(v);
        }
        if let Some(v) = changes.process_number {
            active.process_number = Set(v);
        }
        if let Some(v) = changes.gender {
            active.gender = Set(Some(v));
        }
        if let Some(v) = changes.status {
            active.status = Set(v);
        }
        if let Some(v) = changes.class_id {
            active.class_id = Set(Some(v));
        }
        if let Some(v) = changes.birth_date {
            active.birth_date = Set(Some(v));
        }
        if let Some(v) = changes.email {
            active.email = Set(Some(v));
        }
        if let Some(v) = changes.phone {
            active.phone = Set(Some(v));
        }
        if let Some(v) = changes.guardian_name {
            active.guardian_name = Set(Some(v));
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, || duplicate_process_number(&process_number)))?;
        Ok(Some(student_model_to_domain(model)))
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let result = student::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::database::test_database;
    use chrono::TimeZone;

    fn new_student(name: &str, process_number: &str, status: i32) -> NewStudent {
        NewStudent {
            full_name: name.to_string(),
            process_number: process_number.to_string(),
            gender: Some(1),
            status,
            class_id: None,
            birth_date: None,
            email: None,
            phone: None,
            guardian_name: None,
            enrolled_at: Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_and_find() {
        let repo = SeaOrmStudentRepository::new(test_database().await);
        let created = repo.create(new_student("Ana Silva", "P-001", 1)).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.full_name, "Ana Silva");
        assert_eq!(found.status_label(), "Ativo");

        let by_number = repo.find_by_process_number("P-001").await.unwrap();
        assert_eq!(by_number.map(|s| s.id), Some(created.id));
    }

    #[tokio::test]
    async fn duplicate_process_number_is_a_conflict() {
        let repo = SeaOrmStudentRepository::new(test_database().await);
        repo.create(new_student("Ana", "P-001", 1)).await.unwrap();
        let err = repo.create(new_student("Rui", "P-001", 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_filters_by_status_label_and_sorts_by_name() {
        let repo = SeaOrmStudentRepository::new(test_database().await);
        for (i, name) in ["Zeca", "Bruno", "Carla"].iter().enumerate() {
            repo.create(new_student(name, &format!("A-{i}"), 1)).await.unwrap();
        }
        repo.create(new_student("Abel", "T-1", 2)).await.unwrap();

        let filter = StudentFilter {
            status: Some("Ativo".into()),
            ..Default::default()
        };
        let page = repo.list(&filter, PageRequest::new(1, 10).unwrap()).await.unwrap();

        let names: Vec<_> = page.items.iter().map(|s| s.full_name.as_str()).collect();
        assert_eq!(names, vec!["Bruno", "Carla", "Zeca"]);
        assert_eq!(page.pagination.total_items, 3);
    }

    #[tokio::test]
    async fn unknown_status_label_matches_everything() {
        let repo = SeaOrmStudentRepository::new(test_database().await);
        repo.create(new_student("Ana", "P-1", 1)).await.unwrap();
        repo.create(new_student("Rui", "P-2", 3)).await.unwrap();

        let filter = StudentFilter {
            status: Some("Expulso".into()),
            ..Default::default()
        };
        let page = repo.list(&filter, PageRequest::new(1, 10).unwrap()).await.unwrap();
        assert_eq!(page.pagination.total_items, 2);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repo = SeaOrmStudentRepository::new(test_database().await);
        let created = repo.create(new_student("Ana", "P-1", 1)).await.unwrap();

        let changes = StudentChanges {
            status: Some(4),
            email: Some("ana@escola.ao".into()),
            ..Default::default()
        };
        let updated = repo.update(created.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.status_label(), "Finalizado");
        assert_eq!(updated.email.as_deref(), Some("ana@escola.ao"));

        assert!(repo.update(9999, StudentChanges::default()).await.unwrap().is_none());
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
