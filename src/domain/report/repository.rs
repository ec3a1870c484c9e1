//! Report repository interface

use async_trait::async_trait;

use super::filters::{AcademicReportFilter, FinancialReportFilter, StudentReportFilter};
use super::records::{
    AcademicFilterOptions, AcademicSummary, EvaluationRecord, FinancialFilterOptions,
    FinancialSummary, PaymentRecord, StudentFilterOptions, StudentRecord,
};
use crate::domain::DomainResult;
use crate::shared::types::{PageEnvelope, PageRequest};

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn student_report(
        &self,
        filter: &StudentReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<StudentRecord>>;
    async fn student_filter_options(&self) -> DomainResult<StudentFilterOptions>;

    async fn academic_report(
        &self,
        filter: &AcademicReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<EvaluationRecord>>;
    async fn academic_summary(&self, filter: &AcademicReportFilter)
        -> DomainResult<AcademicSummary>;
    async fn academic_filter_options(&self) -> DomainResult<AcademicFilterOptions>;

    async fn financial_report(
        &self,
        filter: &FinancialReportFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<PaymentRecord>>;
    async fn financial_summary(
        &self,
        filter: &FinancialReportFilter,
    ) -> DomainResult<FinancialSummary>;
    async fn financial_filter_options(&self) -> DomainResult<FinancialFilterOptions>;
}
