//! Class REST API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::dto::{ClassDto, ClassListParams, CreateClassRequest, UpdateClassRequest};
use crate::application::ClassService;
use crate::interfaces::http::common::{
    path_id, ApiResponse, ApiResult, PageParams, PaginatedData, ValidatedJson,
};
use crate::shared::types::PaginationSettings;

#[derive(Clone)]
pub struct ClassState {
    pub service: Arc<ClassService>,
    pub pagination: PaginationSettings,
}

#[utoipa::path(
    get,
    path = "/api/v1/classes",
    tag = "Classes",
    params(ClassListParams, PageParams),
    responses(
        (status = 200, description = "Paged class list", body = ApiResponse<PaginatedData<ClassDto>>),
        (status = 400, description = "Invalid filter or page parameters")
    )
)]
pub async fn list_classes(
    State(state): State<ClassState>,
    Query(params): Query<ClassListParams>,
    Query(page): Query<PageParams>,
) -> ApiResult<ApiResponse<PaginatedData<ClassDto>>> {
    let request = page.to_request(state.pagination)?;
    let page = state.service.list(params.into_filter()?, request).await?;
    Ok(ApiResponse::success(PaginatedData::from_page(page, ClassDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/classes/{id}",
    tag = "Classes",
    params(("id" = i64, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = ApiResponse<ClassDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_class(
    State(state): State<ClassState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<ClassDto>> {
    let class = state.service.get(path_id(&id)?).await?;
    Ok(ApiResponse::success(class.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/classes",
    tag = "Classes",
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ClassDto>),
        (status = 400, description = "Invalid data"),
        (status = 409, description = "Name already used in that academic year")
    )
)]
pub async fn create_class(
    State(state): State<ClassState>,
    ValidatedJson(body): ValidatedJson<CreateClassRequest>,
) -> ApiResult<(StatusCode, ApiResponse<ClassDto>)> {
    let class = state.service.create(body.into()).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Class created", class.into()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/classes/{id}",
    tag = "Classes",
    params(("id" = i64, Path, description = "Class ID")),
    request_body = UpdateClassRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ClassDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already used in that academic year")
    )
)]
pub async fn update_class(
    State(state): State<ClassState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateClassRequest>,
) -> ApiResult<ApiResponse<ClassDto>> {
    let class = state.service.update(path_id(&id)?, body.into()).await?;
    Ok(ApiResponse::with_message("Class updated", class.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/classes/{id}",
    tag = "Classes",
    params(("id" = i64, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_class(
    State(state): State<ClassState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.service.delete(path_id(&id)?).await?;
    Ok(ApiResponse::done("Class deleted"))
}
