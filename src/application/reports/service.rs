//! Report queries
//!
//! Read-only; every method delegates to the report repository after
//! checking the filter bag for contradictions the caller must fix.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::domain::report::{
    AcademicFilterOptions, AcademicReportFilter, AcademicSummary, EvaluationRecord,
    FinancialFilterOptions, FinancialReportFilter, FinancialSummary, PaymentRecord,
    StudentFilterOptions, StudentRecord, StudentReportFilter,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::types::{PageEnvelope, PageRequest};

/// Highest grade on the 0-20 scale.
const MAX_GRADE: f64 = 20.0;

pub struct ReportService {
    repos: Arc<dyn RepositoryProvider>,
}

fn check_term(term: Option<i32>) -> DomainResult<()> {
    match term {
        Some(t) if !(1..=3).contains(&t) => Err(DomainError::validation(format!(
            "term must be between 1 and 3, got {}",
            t
        ))),
        _ => Ok(()),
    }
}

fn check_grade(name: &str, grade: Option<f64>) -> DomainResult<()> {
    match grade {
        Some(g) if !(0.0..=MAX_GRADE).contains(&g) => Err(DomainError::validation(format!(
            "{} must be between 0 and 20, got {}",
            name, g
        ))),
        _ => Ok(()),
    }
}

fn check_non_negative(name: &str, amount: Option<i64>) -> DomainResult<()> {
    match amount {
        Some(a) if a < 0 => Err(DomainError::validation(format!(
            "{} must not be negative",
            name
        ))),
        _ => Ok(()),
    }
}

/// Both bounds set and `lower` after `upper`.
fn check_order<T: PartialOrd>(
    lower_name: &str,
    lower: Option<T>,
    upper_name: &str,
    upper: Option<T>,
) -> DomainResult<()> {
    match (lower, upper) {
        (Some(lo), Some(hi)) if lo > hi => Err(DomainError::validation(format!(
            "{} must not be greater than {}",
            lower_name, upper_name
        ))),
        _ => Ok(()),
    }
}

impl ReportService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn student_report(
        &self,
        filter: StudentReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<StudentRecord>> {
        check_order(
            "enrolledFrom",
            filter.enrolled_from,
            "enrolledTo",
            filter.enrolled_to,
        )?;
        let started = Instant::now();
        let result = self.repos.reports().student_report(&filter, page).await?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            total = result.pagination.total_items,
            "Student report"
        );
        Ok(result)
    }

    pub async fn student_filter_options(&self) -> DomainResult<StudentFilterOptions> {
        self.repos.reports().student_filter_options().await
    }

    pub async fn academic_report(
        &self,
        filter: AcademicReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<EvaluationRecord>> {
        Self::check_academic(&filter)?;
        let started = Instant::now();
        let result = self.repos.reports().academic_report(&filter, page).await?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            total = result.pagination.total_items,
            "Academic report"
        );
        Ok(result)
    }

    pub async fn academic_summary(
        &self,
        filter: AcademicReportFilter,
    ) -> DomainResult<AcademicSummary> {
        Self::check_academic(&filter)?;
        self.repos.reports().academic_summary(&filter).await
    }

    pub async fn academic_filter_options(&self) -> DomainResult<AcademicFilterOptions> {
        self.repos.reports().academic_filter_options().await
    }

    pub async fn financial_report(
        &self,
        filter: FinancialReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<PaymentRecord>> {
        Self::check_financial(&filter)?;
        let started = Instant::now();
        let result = self.repos.reports().financial_report(&filter, page).await?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            total = result.pagination.total_items,
            "Financial report"
        );
        Ok(result)
    }

    pub async fn financial_summary(
        &self,
        filter: FinancialReportFilter,
    ) -> DomainResult<FinancialSummary> {
        Self::check_financial(&filter)?;
        self.repos.reports().financial_summary(&filter).await
    }

    pub async fn financial_filter_options(&self) -> DomainResult<FinancialFilterOptions> {
        self.repos.reports().financial_filter_options().await
    }

    fn check_academic(filter: &AcademicReportFilter) -> DomainResult<()> {
        check_term(filter.term)?;
        check_grade("minGrade", filter.min_grade)?;
        check_grade("maxGrade", filter.max_grade)?;
        check_order("minGrade", filter.min_grade, "maxGrade", filter.max_grade)?;
        check_order("from", filter.from, "to", filter.to)
    }

    fn check_financial(filter: &FinancialReportFilter) -> DomainResult<()> {
        check_non_negative("minAmount", filter.min_amount)?;
        check_non_negative("maxAmount", filter.max_amount)?;
        check_order("minAmount", filter.min_amount, "maxAmount", filter.max_amount)?;
        check_order("from", filter.from, "to", filter.to)
    }
}
