//! SeaORM implementation of ReportRepository
//!
//! Report queries filter a single table; clauses on related tables are
//! expressed as `IN (subquery)` so the count and the page fetch share one
//! predicate. Relations of the fetched page are then loaded in batches.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, Query, SelectStatement, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use super::conditions::{contains_expr, ConditionBuilder};
use super::db_error::db_err;
use super::page_source::SelectSource;
use super::student_repository::{student_conditions, student_model_to_domain};
use crate::domain::report::{
    AcademicFilterOptions, AcademicReportFilter, AcademicSummary, ClassRef, Evaluation,
    EvaluationRecord, FinancialFilterOptions, FinancialReportFilter, FinancialSummary, NamedRef,
    Payment, PaymentRecord, ReportRepository, StatusTotal, StudentFilterOptions, StudentRecord,
    StudentReportFilter, StudentRef, PASSING_GRADE,
};
use crate::domain::status::{EVALUATION_KIND, PAYMENT_STATUS};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{
    course, evaluation, payment, school_class, student, subject,
};
use crate::shared::query::resolve_page;
use crate::shared::types::{PageEnvelope, PageRequest};

pub struct SeaOrmReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn evaluation_model_to_domain(model: evaluation::Model) -> Evaluation {
    Evaluation {
        id: model.id,
        student_id: model.student_id,
        subject_id: model.subject_id,
        class_id: model.class_id,
        term: model.term,
        kind: model.kind,
        grade: model.grade,
        evaluated_at: model.evaluated_at,
    }
}

fn payment_model_to_domain(model: payment::Model) -> Payment {
    Payment {
        id: model.id,
        student_id: model.student_id,
        reference: model.reference,
        description: model.description,
        amount: model.amount,
        status: model.status,
        method: model.method,
        due_date: model.due_date,
        paid_at: model.paid_at,
    }
}

fn class_ref(model: &school_class::Model) -> ClassRef {
    ClassRef {
        id: model.id,
        name: model.name.clone(),
        academic_year: model.academic_year.clone(),
    }
}

fn student_ref(model: &student::Model) -> StudentRef {
    StudentRef {
        id: model.id,
        full_name: model.full_name.clone(),
        process_number: model.process_number.clone(),
    }
}

// ── Predicate helpers ───────────────────────────────────────────

/// `SELECT id FROM students WHERE name or process number contains needle`
fn students_matching(needle: &str) -> SelectStatement {
    Query::select()
        .column(student::Column::Id)
        .from(student::Entity)
        .cond_where(
            Condition::any()
                .add(contains_expr(student::Column::FullName, needle))
                .add(contains_expr(student::Column::ProcessNumber, needle)),
        )
        .to_owned()
}

/// `SELECT id FROM classes WHERE <condition>`
fn classes_where(condition: impl sea_orm::sea_query::IntoCondition) -> SelectStatement {
    Query::select()
        .column(school_class::Column::Id)
        .from(school_class::Entity)
        .cond_where(condition)
        .to_owned()
}

fn student_report_condition(filter: &StudentReportFilter) -> Condition {
    student_conditions(
        filter.search.as_deref(),
        filter.status.as_deref(),
        filter.gender.as_deref(),
        filter.class_id,
        filter.academic_year.as_deref(),
    )
    .add_opt(filter.course_id, |course_id| {
        student::Column::ClassId
            .in_subquery(classes_where(school_class::Column::CourseId.eq(course_id)))
    })
    .range(
        student::Column::EnrolledAt,
        filter.enrolled_from,
        filter.enrolled_to,
    )
    .build()
}

fn academic_condition(filter: &AcademicReportFilter) -> Condition {
    ConditionBuilder::new()
        .add_opt(filter.search.as_deref(), |needle| {
            evaluation::Column::StudentId.in_subquery(students_matching(needle))
        })
        .eq(evaluation::Column::SubjectId, filter.subject_id)
        .eq(evaluation::Column::ClassId, filter.class_id)
        .eq(evaluation::Column::Term, filter.term)
        .mapped(
            evaluation::Column::Kind,
            &EVALUATION_KIND,
            filter.kind.as_deref(),
        )
        .add_opt(filter.academic_year.as_deref(), |year| {
            evaluation::Column::ClassId
                .in_subquery(classes_where(school_class::Column::AcademicYear.eq(year)))
        })
        .range(evaluation::Column::Grade, filter.min_grade, filter.max_grade)
        .range(evaluation::Column::EvaluatedAt, filter.from, filter.to)
        .build()
}

fn financial_condition(filter: &FinancialReportFilter) -> Condition {
    ConditionBuilder::new()
        .add_opt(filter.search.as_deref(), |needle| {
            Condition::any()
                .add(contains_expr(payment::Column::Reference, needle))
                .add(contains_expr(payment::Column::Description, needle))
                .add(payment::Column::StudentId.in_subquery(students_matching(needle)))
        })
        .mapped(
            payment::Column::Status,
            &PAYMENT_STATUS,
            filter.status.as_deref(),
        )
        .eq_ignore_case(payment::Column::Method, filter.method.as_deref())
        .range(payment::Column::Amount, filter.min_amount, filter.max_amount)
        .range(payment::Column::DueDate, filter.from, filter.to)
        .build()
}

// ── Batch loading ───────────────────────────────────────────────

fn distinct_ids(ids: impl Iterator<Item = Option<i64>>) -> Vec<i64> {
    ids.flatten().collect::<BTreeSet<_>>().into_iter().collect()
}

async fn load_by_ids<E>(
    db: &DatabaseConnection,
    id_column: E::Column,
    ids: Vec<i64>,
) -> DomainResult<Vec<E::Model>>
where
    E: EntityTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    E::find()
        .filter(id_column.is_in(ids))
        .all(db)
        .await
        .map_err(db_err)
}

impl SeaOrmReportRepository {
    async fn classes_by_id(
        &self,
        ids: Vec<i64>,
    ) -> DomainResult<HashMap<i64, school_class::Model>> {
        let models =
            load_by_ids::<school_class::Entity>(&self.db, school_class::Column::Id, ids).await?;
        Ok(models.into_iter().map(|m| (m.id, m)).collect())
    }

    async fn students_by_id(&self, ids: Vec<i64>) -> DomainResult<HashMap<i64, student::Model>> {
        let models = load_by_ids::<student::Entity>(&self.db, student::Column::Id, ids).await?;
        Ok(models.into_iter().map(|m| (m.id, m)).collect())
    }

    async fn all_classes(&self) -> DomainResult<Vec<ClassRef>> {
        let models = school_class::Entity::find()
            .order_by_desc(school_class::Column::AcademicYear)
            .order_by_asc(school_class::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.iter().map(class_ref).collect())
    }

    async fn academic_years(&self) -> DomainResult<Vec<String>> {
        school_class::Entity::find()
            .select_only()
            .column(school_class::Column::AcademicYear)
            .distinct()
            .order_by_desc(school_class::Column::AcademicYear)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ReportRepository for SeaOrmReportRepository {
    async fn student_report(
        &self,
        filter: &StudentReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<StudentRecord>> {
        let select = student::Entity::find()
            .filter(student_report_condition(filter))
            .order_by_asc(student::Column::FullName)
            .order_by_asc(student::Column::Id);

        let page =
            resolve_page("student_report", &SelectSource::new(&self.db, select), page).await?;

        let classes = self
            .classes_by_id(distinct_ids(page.items.iter().map(|s| s.class_id)))
            .await?;
        let course_ids = distinct_ids(classes.values().map(|c| c.course_id));
        let courses: HashMap<i64, course::Model> =
            load_by_ids::<course::Entity>(&self.db, course::Column::Id, course_ids)
                .await?
                .into_iter()
                .map(|m| (m.id, m))
                .collect();

        Ok(page.map(|model| {
            let class = model.class_id.and_then(|id| classes.get(&id));
            let course = class
                .and_then(|c| c.course_id)
                .and_then(|id| courses.get(&id))
                .map(|c| NamedRef {
                    id: c.id,
                    name: c.name.clone(),
                });
            StudentRecord {
                class: class.map(class_ref),
                course,
                student: student_model_to_domain(model),
            }
        }))
    }

    async fn student_filter_options(&self) -> DomainResult<StudentFilterOptions> {
        let courses = async {
            course::Entity::find()
                .order_by_asc(course::Column::Name)
                .all(&self.db)
                .await
                .map_err(db_err)
        };
        let (academic_years, classes, courses) =
            tokio::try_join!(self.academic_years(), self.all_classes(), courses)?;

        Ok(StudentFilterOptions {
            academic_years,
            classes,
            courses: courses
                .into_iter()
                .map(|c| NamedRef {
                    id: c.id,
                    name: c.name,
                })
                .collect(),
        })
    }

    async fn academic_report(
        &self,
        filter: &AcademicReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<EvaluationRecord>> {
        let select = evaluation::Entity::find()
            .filter(academic_condition(filter))
            .order_by_asc(evaluation::Column::EvaluatedAt)
            .order_by_asc(evaluation::Column::Id);

        let page =
            resolve_page("academic_report", &SelectSource::new(&self.db, select), page).await?;

        let students =
            self.students_by_id(distinct_ids(page.items.iter().map(|e| Some(e.student_id))));
        let classes = self.classes_by_id(distinct_ids(page.items.iter().map(|e| e.class_id)));
        let subjects = load_by_ids::<subject::Entity>(
            &self.db,
            subject::Column::Id,
            distinct_ids(page.items.iter().map(|e| e.subject_id)),
        );
        let (students, classes, subjects) = tokio::try_join!(students, classes, subjects)?;
        let subjects: HashMap<i64, subject::Model> =
            subjects.into_iter().map(|m| (m.id, m)).collect();

        Ok(page.map(|model| EvaluationRecord {
            student: students.get(&model.student_id).map(student_ref),
            subject: model
                .subject_id
                .and_then(|id| subjects.get(&id))
                .map(|s| NamedRef {
                    id: s.id,
                    name: s.name.clone(),
                }),
            class: model
                .class_id
                .and_then(|id| classes.get(&id))
                .map(class_ref),
            evaluation: evaluation_model_to_domain(model),
        }))
    }

    async fn academic_summary(
        &self,
        filter: &AcademicReportFilter,
    ) -> DomainResult<AcademicSummary> {
        let base = evaluation::Entity::find().filter(academic_condition(filter));

        let total = async { base.clone().count(&self.db).await.map_err(db_err) };
        let stats = async {
            base.clone()
                .select_only()
                .column_as(Expr::col(evaluation::Column::Grade).count(), "graded")
                .column_as(
                    SimpleExpr::from(Func::avg(Expr::col(evaluation::Column::Grade))),
                    "average",
                )
                .into_tuple::<(i64, Option<f64>)>()
                .one(&self.db)
                .await
                .map_err(db_err)
        };
        let approved = async {
            base.clone()
                .filter(evaluation::Column::Grade.gte(PASSING_GRADE))
                .count(&self.db)
                .await
                .map_err(db_err)
        };
        let failed = async {
            base.clone()
                .filter(evaluation::Column::Grade.lt(PASSING_GRADE))
                .count(&self.db)
                .await
                .map_err(db_err)
        };

        let (total_evaluations, stats, approved, failed) =
            tokio::try_join!(total, stats, approved, failed)?;
        let (graded, average_grade) = stats.unwrap_or((0, None));

        Ok(AcademicSummary {
            total_evaluations,
            graded_evaluations: graded.max(0) as u64,
            average_grade,
            approved,
            failed,
        })
    }

    async fn academic_filter_options(&self) -> DomainResult<AcademicFilterOptions> {
        let subjects = async {
            subject::Entity::find()
                .order_by_asc(subject::Column::Name)
                .all(&self.db)
                .await
                .map_err(db_err)
        };
        let terms = async {
            evaluation::Entity::find()
                .select_only()
                .column(evaluation::Column::Term)
                .distinct()
                .order_by_asc(evaluation::Column::Term)
                .into_tuple::<i32>()
                .all(&self.db)
                .await
                .map_err(db_err)
        };
        let (academic_years, classes, subjects, terms) =
            tokio::try_join!(self.academic_years(), self.all_classes(), subjects, terms)?;

        Ok(AcademicFilterOptions {
            academic_years,
            classes,
            subjects: subjects
                .into_iter()
                .map(|s| NamedRef {
                    id: s.id,
                    name: s.name,
                })
                .collect(),
            terms,
        })
    }

    async fn financial_report(
        &self,
        filter: &FinancialReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<PaymentRecord>> {
        let select = payment::Entity::find()
            .filter(financial_condition(filter))
            .order_by_asc(payment::Column::DueDate)
            .order_by_asc(payment::Column::Id);

        let page =
            resolve_page("financial_report", &SelectSource::new(&self.db, select), page).await?;

        let students = self
            .students_by_id(distinct_ids(page.items.iter().map(|p| p.student_id)))
            .await?;

        Ok(page.map(|model| PaymentRecord {
            student: model
                .student_id
                .and_then(|id| students.get(&id))
                .map(student_ref),
            payment: payment_model_to_domain(model),
        }))
    }

    async fn financial_summary(
        &self,
        filter: &FinancialReportFilter,
    ) -> DomainResult<FinancialSummary> {
        let rows = payment::Entity::find()
            .filter(financial_condition(filter))
            .select_only()
            .column(payment::Column::Status)
            .column_as(Expr::col(payment::Column::Id).count(), "count")
            .column_as(Expr::col(payment::Column::Amount).sum(), "amount")
            .group_by(payment::Column::Status)
            .order_by_asc(payment::Column::Status)
            .into_tuple::<(i32, i64, Option<i64>)>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let by_status: Vec<StatusTotal> = rows
            .into_iter()
            .map(|(status, count, amount)| StatusTotal {
                status,
                count: count.max(0) as u64,
                amount: amount.unwrap_or(0),
            })
            .collect();

        Ok(FinancialSummary {
            total_payments: by_status.iter().map(|s| s.count).sum(),
            total_amount: by_status.iter().map(|s| i128::from(s.amount)).sum(),
            by_status,
        })
    }

    async fn financial_filter_options(&self) -> DomainResult<FinancialFilterOptions> {
        let methods = payment::Entity::find()
            .select_only()
            .column(payment::Column::Method)
            .filter(payment::Column::Method.is_not_null())
            .distinct()
            .order_by_asc(payment::Column::Method)
            .into_tuple::<Option<String>>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(FinancialFilterOptions {
            methods: methods.into_iter().flatten().collect(),
        })
    }
}
