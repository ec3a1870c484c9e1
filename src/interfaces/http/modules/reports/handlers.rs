//! Report REST API handlers

use std::sync::Arc;

use axum::extract::{Query, State};

use super::dto::{
    AcademicFilterOptionsDto, AcademicSummaryDto, EvaluationRowDto, FinancialFilterOptionsDto,
    FinancialSummaryDto, PaymentRowDto, StudentFilterOptionsDto, StudentReportRowDto,
};
use super::params::{AcademicReportParams, FinancialReportParams, StudentReportParams};
use crate::application::ReportService;
use crate::interfaces::http::common::{ApiResponse, ApiResult, PageParams, PaginatedData};
use crate::shared::types::PaginationSettings;

#[derive(Clone)]
pub struct ReportState {
    pub service: Arc<ReportService>,
    pub pagination: PaginationSettings,
}

// ── Students ────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/reports/students",
    tag = "Reports",
    params(StudentReportParams, PageParams),
    responses(
        (status = 200, description = "Student report page", body = ApiResponse<PaginatedData<StudentReportRowDto>>),
        (status = 400, description = "Invalid filter or page parameters")
    )
)]
pub async fn student_report(
    State(state): State<ReportState>,
    Query(params): Query<StudentReportParams>,
    Query(page): Query<PageParams>,
) -> ApiResult<ApiResponse<PaginatedData<StudentReportRowDto>>> {
    let request = page.to_request(state.pagination)?;
    let page = state
        .service
        .student_report(params.into_filter()?, request)
        .await?;
    Ok(ApiResponse::success(PaginatedData::from_page(
        page,
        StudentReportRowDto::from,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/students/filter-options",
    tag = "Reports",
    responses(
        (status = 200, description = "Values accepted by the student report filters", body = ApiResponse<StudentFilterOptionsDto>)
    )
)]
pub async fn student_filter_options(
    State(state): State<ReportState>,
) -> ApiResult<ApiResponse<StudentFilterOptionsDto>> {
    let options = state.service.student_filter_options().await?;
    Ok(ApiResponse::success(options.into()))
}

// ── Academic ────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/reports/academic",
    tag = "Reports",
    params(AcademicReportParams, PageParams),
    responses(
        (status = 200, description = "Evaluation report page", body = ApiResponse<PaginatedData<EvaluationRowDto>>),
        (status = 400, description = "Invalid filter or page parameters")
    )
)]
pub async fn academic_report(
    State(state): State<ReportState>,
    Query(params): Query<AcademicReportParams>,
    Query(page): Query<PageParams>,
) -> ApiResult<ApiResponse<PaginatedData<EvaluationRowDto>>> {
    let request = page.to_request(state.pagination)?;
    let page = state
        .service
        .academic_report(params.into_filter()?, request)
        .await?;
    Ok(ApiResponse::success(PaginatedData::from_page(
        page,
        EvaluationRowDto::from,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/academic/summary",
    tag = "Reports",
    params(AcademicReportParams),
    responses(
        (status = 200, description = "Totals over the filtered evaluations", body = ApiResponse<AcademicSummaryDto>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn academic_summary(
    State(state): State<ReportState>,
    Query(params): Query<AcademicReportParams>,
) -> ApiResult<ApiResponse<AcademicSummaryDto>> {
    let summary = state.service.academic_summary(params.into_filter()?).await?;
    Ok(ApiResponse::success(summary.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/academic/filter-options",
    tag = "Reports",
    responses(
        (status = 200, description = "Values accepted by the academic report filters", body = ApiResponse<AcademicFilterOptionsDto>)
    )
)]
pub async fn academic_filter_options(
    State(state): State<ReportState>,
) -> ApiResult<ApiResponse<AcademicFilterOptionsDto>> {
    let options = state.service.academic_filter_options().await?;
    Ok(ApiResponse::success(options.into()))
}

// ── Financial ───────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/reports/financial",
    tag = "Reports",
    params(FinancialReportParams, PageParams),
    responses(
        (status = 200, description = "Payment report page", body = ApiResponse<PaginatedData<PaymentRowDto>>),
        (status = 400, description = "Invalid filter or page parameters")
    )
)]
pub async fn financial_report(
    State(state): State<ReportState>,
    Query(params): Query<FinancialReportParams>,
    Query(page): Query<PageParams>,
) -> ApiResult<ApiResponse<PaginatedData<PaymentRowDto>>> {
    let request = page.to_request(state.pagination)?;
    let page = state
        .service
        .financial_report(params.into_filter()?, request)
        .await?;
    Ok(ApiResponse::success(PaginatedData::from_page(
        page,
        PaymentRowDto::from,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/financial/summary",
    tag = "Reports",
    params(FinancialReportParams),
    responses(
        (status = 200, description = "Per-status totals over the filtered payments", body = ApiResponse<FinancialSummaryDto>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn financial_summary(
    State(state): State<ReportState>,
    Query(params): Query<FinancialReportParams>,
) -> ApiResult<ApiResponse<FinancialSummaryDto>> {
    let summary = state.service.financial_summary(params.into_filter()?).await?;
    Ok(ApiResponse::success(summary.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/financial/filter-options",
    tag = "Reports",
    responses(
        (status = 200, description = "Values accepted by the financial report filters", body = ApiResponse<FinancialFilterOptionsDto>)
    )
)]
pub async fn financial_filter_options(
    State(state): State<ReportState>,
) -> ApiResult<ApiResponse<FinancialFilterOptionsDto>> {
    let options = state.service.financial_filter_options().await?;
    Ok(ApiResponse::success(options.into()))
}
