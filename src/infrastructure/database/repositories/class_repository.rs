//! SeaORM implementation of ClassRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use super::conditions::ConditionBuilder;
use super::db_error::{db_err, write_err};
use super::page_source::SelectSource;
use crate::domain::school_class::{
    ClassChanges, ClassFilter, ClassRepository, NewClass, SchoolClass,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{course, school_class};
use crate::shared::query::resolve_page;
use crate::shared::types::{PageEnvelope, PageRequest};

pub struct SeaOrmClassRepository {
    db: DatabaseConnection,
}

impl SeaOrmClassRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn class_model_to_domain(model: school_class::Model) -> SchoolClass {
    SchoolClass {
        id: model.id,
        name: model.name,
        academic_year: model.academic_year,
        course_id: model.course_id,
        shift: model.shift,
        room: model.room,
        created_at: model.created_at,
    }
}

fn duplicate_class(name: &str, academic_year: &str) -> String {
    format!(
        "Class '{}' already exists for academic year {}",
        name, academic_year
    )
}

#[async_trait]
impl ClassRepository for SeaOrmClassRepository {
    async fn list(
        &self,
        filter: &ClassFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<SchoolClass>> {
        let condition = ConditionBuilder::new()
            .search(
                &[school_class::Column::Name, school_class::Column::Room],
                filter.search.as_deref(),
            )
            .eq(
                school_class::Column::AcademicYear,
                filter.academic_year.clone(),
            )
            .eq(school_class::Column::CourseId, filter.course_id)
            .eq_ignore_case(school_class::Column::Shift, filter.shift.as_deref())
            .build();

        let select = school_class::Entity::find()
            .filter(condition)
            .order_by_asc(school_class::Column::Name)
            .order_by_asc(school_class::Column::Id);

        let page = resolve_page("classes", &SelectSource::new(&self.db, select), page).await?;
        Ok(page.map(class_model_to_domain))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<SchoolClass>> {
        let model = school_class::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(class_model_to_domain))
    }

    async fn find_by_name_and_year(
        &self,
        name: &str,
        academic_year: &str,
    ) -> DomainResult<Option<SchoolClass>> {
        let model = school_class::Entity::find()
            .filter(school_class::Column::Name.eq(name))
            .filter(school_class::Column::AcademicYear.eq(academic_year))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(class_model_to_domain))
    }

    async fn course_exists(&self, course_id: i64) -> DomainResult<bool> {
        let count = course::Entity::find()
            .filter(course::Column::Id.eq(course_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn create(&self, new: NewClass) -> DomainResult<SchoolClass> {
        let conflict = duplicate_class(&new.name, &new.academic_year);

        let active = school_class::ActiveModel {
            name: Set(new.name),
            academic_year: Set(new.academic_year),
            course_id: Set(new.course_id),
            shift: Set(new.shift),
            room: Set(new.room),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, || conflict))?;

        debug!(class_id = model.id, "Class created");
        Ok(class_model_to_domain(model))
    }

    async fn update(&self, id: i64, changes: ClassChanges) -> DomainResult<Option<SchoolClass>> {
        let Some(model) = school_class::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let conflict = duplicate_class(
            changes.name.as_deref().unwrap_or(&model.name),
            changes
                .academic_year
                .as_deref()
                .unwrap_or(&model.academic_year),
        );

        let mut active: school_class::ActiveModel = model.into();
        if let Some(v) = changes.name {
            active.name = Set(v);
        }
        if let Some(v) = changes.academic_year {
            active.academic_year = Set(v);
        }
        if let Some(v) = changes.course_id {
            active.course_id = Set(Some(v));
        }
        if let Some(v) = changes.shift {
            active.shift = Set(Some(v));
        }
        if let Some(v) = changes.room {
            active.room = Set(Some(v));
        }

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, || conflict))?;
        Ok(Some(class_model_to_domain(model)))
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let result = school_class::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
