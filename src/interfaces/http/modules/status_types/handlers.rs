//! Status-type handlers
//!
//! Stateless: the tables are compiled in.

use axum::extract::Path;

use super::dto::StatusTypeDto;
use crate::domain::status::{codec_named, ALL_CODECS};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ApiResult};

#[utoipa::path(
    get,
    path = "/api/v1/status-types",
    tag = "Status Types",
    responses(
        (status = 200, description = "All code tables", body = ApiResponse<Vec<StatusTypeDto>>)
    )
)]
pub async fn list_status_types() -> ApiResponse<Vec<StatusTypeDto>> {
    ApiResponse::success(ALL_CODECS.iter().map(StatusTypeDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/status-types/{kind}",
    tag = "Status Types",
    params(("kind" = String, Path, description = "student, payment, gender or evaluation")),
    responses(
        (status = 200, description = "One code table", body = ApiResponse<StatusTypeDto>),
        (status = 404, description = "Unknown kind")
    )
)]
pub async fn get_status_type(Path(kind): Path<String>) -> ApiResult<ApiResponse<StatusTypeDto>> {
    let codec =
        codec_named(&kind).ok_or_else(|| DomainError::not_found("Status type", "kind", &kind))?;
    Ok(ApiResponse::success(StatusTypeDto::from(&codec)))
}
