//! Migration to create evaluations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evaluations::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Evaluations::SubjectId).big_integer().null())
                    .col(ColumnDef::new(Evaluations::ClassId).big_integer().null())
                    .col(ColumnDef::new(Evaluations::Term).integer().not_null())
                    .col(ColumnDef::new(Evaluations::Kind).integer().not_null())
                    .col(ColumnDef::new(Evaluations::Grade).double().null())
                    .col(
                        ColumnDef::new(Evaluations::EvaluatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluations_student")
                            .from(Evaluations::Table, Evaluations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluations_subject")
                            .from(Evaluations::Table, Evaluations::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluations_class")
                            .from(Evaluations::Table, Evaluations::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_student_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_evaluated_at")
                    .table(Evaluations::Table)
                    .col(Evaluations::EvaluatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Evaluations {
    Table,
    Id,
    StudentId,
    SubjectId,
    ClassId,
    Term,
    Kind,
    Grade,
    EvaluatedAt,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}
