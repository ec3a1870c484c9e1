//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_courses;
mod m20240901_000002_create_classes;
mod m20240901_000003_create_students;
mod m20240901_000004_create_subjects;
mod m20240901_000005_create_evaluations;
mod m20240901_000006_create_payments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_courses::Migration),
            Box::new(m20240901_000002_create_classes::Migration),
            Box::new(m20240901_000003_create_students::Migration),
            Box::new(m20240901_000004_create_subjects::Migration),
            Box::new(m20240901_000005_create_evaluations::Migration),
            Box::new(m20240901_000006_create_payments::Migration),
        ]
    }
}
