//! Response envelope
//!
//! Every JSON body leaves the server as `{ success, message, data? }` and is
//! passed through [`stringify_unsafe_integers`] on the way out.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::shared::json::stringify_unsafe_integers;
use crate::shared::types::{PageEnvelope, PageMeta};

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_message("OK", data)
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload (e.g. after a delete).
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let value = match serde_json::to_value(&self) {
            Ok(value) => stringify_unsafe_integers(value),
            Err(e) => {
                error!(error = %e, "Failed to serialize response body");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("application/json"),
                    )],
                    r#"{"success":false,"message":"Internal server error"}"#,
                )
                    .into_response();
            }
        };
        axum::Json(value).into_response()
    }
}

/// Navigation metadata as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetaDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl From<PageMeta> for PageMetaDto {
    fn from(m: PageMeta) -> Self {
        Self {
            current_page: m.current_page,
            total_pages: m.total_pages,
            total_items: m.total_items,
            items_per_page: m.items_per_page,
            has_next_page: m.has_next_page,
            has_previous_page: m.has_previous_page,
        }
    }
}

/// `data` of a paged response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedData<T> {
    pub items: Vec<T>,
    pub pagination: PageMetaDto,
}

impl<T> PaginatedData<T> {
    pub fn from_page<R>(page: PageEnvelope<R>, project: impl FnMut(R) -> T) -> Self {
        let page = page.map(project);
        Self {
            items: page.items,
            pagination: page.pagination.into(),
        }
    }
}
