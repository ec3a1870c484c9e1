//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::report::ReportRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::school_class::ClassRepository;
use crate::domain::student::StudentRepository;

use super::class_repository::SeaOrmClassRepository;
use super::report_repository::SeaOrmReportRepository;
use super::student_repository::SeaOrmStudentRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let student = repos.students().find_by_id(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    students: SeaOrmStudentRepository,
    classes: SeaOrmClassRepository,
    reports: SeaOrmReportRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            students: SeaOrmStudentRepository::new(db.clone()),
            classes: SeaOrmClassRepository::new(db.clone()),
            reports: SeaOrmReportRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn students(&self) -> &dyn StudentRepository {
        &self.students
    }

    fn classes(&self) -> &dyn ClassRepository {
        &self.classes
    }

    fn reports(&self) -> &dyn ReportRepository {
        &self.reports
    }
}
