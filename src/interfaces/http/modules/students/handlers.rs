//! Student REST API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::dto::{CreateStudentRequest, StudentDto, StudentListParams, UpdateStudentRequest};
use crate::application::StudentService;
use crate::interfaces::http::common::{
    path_id, ApiResponse, ApiResult, PageParams, PaginatedData, ValidatedJson,
};
use crate::shared::types::PaginationSettings;

#[derive(Clone)]
pub struct StudentState {
    pub service: Arc<StudentService>,
    pub pagination: PaginationSettings,
}

#[utoipa::path(
    get,
    path = "/api/v1/students",
    tag = "Students",
    params(StudentListParams, PageParams),
    responses(
        (status = 200, description = "Paged student list", body = ApiResponse<PaginatedData<StudentDto>>),
        (status = 400, description = "Invalid filter or page parameters")
    )
)]
pub async fn list_students(
    State(state): State<StudentState>,
    Query(params): Query<StudentListParams>,
    Query(page): Query<PageParams>,
) -> ApiResult<ApiResponse<PaginatedData<StudentDto>>> {
    let request = page.to_request(state.pagination)?;
    let filter = params.into_filter()?;
    let page = state.service.list(filter, request).await?;
    Ok(ApiResponse::success(PaginatedData::from_page(
        page,
        StudentDto::from,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    tag = "Students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = ApiResponse<StudentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_student(
    State(state): State<StudentState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<StudentDto>> {
    let student = state.service.get(path_id(&id)?).await?;
    Ok(ApiResponse::success(student.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/students",
    tag = "Students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<StudentDto>),
        (status = 400, description = "Invalid data"),
        (status = 409, description = "Process number already in use"),
        (status = 422, description = "Body failed validation")
    )
)]
pub async fn create_student(
    State(state): State<StudentState>,
    ValidatedJson(body): ValidatedJson<CreateStudentRequest>,
) -> ApiResult<(StatusCode, ApiResponse<StudentDto>)> {
    let student = state.service.create(body.into()).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Student created", student.into()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    tag = "Students",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<StudentDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Process number already in use")
    )
)]
pub async fn update_student(
    State(state): State<StudentState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateStudentRequest>,
) -> ApiResult<ApiResponse<StudentDto>> {
    let student = state.service.update(path_id(&id)?, body.into()).await?;
    Ok(ApiResponse::with_message("Student updated", student.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    tag = "Students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_student(
    State(state): State<StudentState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.service.delete(path_id(&id)?).await?;
    Ok(ApiResponse::done("Student deleted"))
}
