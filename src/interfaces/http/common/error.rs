//! Domain error -> HTTP response, in one place

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use super::response::ApiResponse;
use crate::domain::DomainError;

/// Message sent for server-side failures; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct ApiError(pub DomainError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.0.is_client_error() {
            debug!(status = status.as_u16(), error = %self.0, "Request rejected");
            self.0.to_string()
        } else {
            error!(error = %self.0, "Request failed on the persistence layer");
            INTERNAL_ERROR_MESSAGE.to_string()
        };
        (status, ApiResponse::<()>::error(message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn message_of(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["message"].as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn each_variant_has_one_status() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                DomainError::not_found("Student", "id", 1),
                StatusCode::NOT_FOUND,
            ),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                DomainError::Database("locked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[tokio::test]
    async fn database_details_are_not_exposed() {
        let response = ApiError(DomainError::Database("no such table: students".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message_of(response).await, INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let response = ApiError(DomainError::not_found("Class", "id", 3)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(message_of(response).await, "Class with id=3 not found");
    }
}
