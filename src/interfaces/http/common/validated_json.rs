//! JSON body extractor with `validator` checks
//!
//! Malformed JSON is answered with 400, a body that parses but fails
//! validation with 422 listing every offending field.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::response::ApiResponse;

/// Like `axum::Json<T>`, but `T::validate()` has passed.
///
/// ```ignore
/// async fn create(ValidatedJson(body): ValidatedJson<CreateStudentRequest>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// `field: message` for every failed rule, sorted by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    lines.sort();

    if lines.is_empty() {
        "Validation failed".to_string()
    } else {
        lines.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Malformed(rejection) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::<()>::error(format!("Invalid JSON: {}", rejection.body_text())),
            )
                .into_response(),
            Self::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiResponse::<()>::error(describe(&errors)),
            )
                .into_response(),
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Malformed)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Enrolment {
        #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
        name: String,
        #[validate(range(min = 1, max = 3))]
        term: u32,
    }

    async fn handler(ValidatedJson(body): ValidatedJson<Enrolment>) -> String {
        format!("{}:{}", body.name, body.term)
    }

    async fn send(body: &'static str) -> (StatusCode, String) {
        use tower::ServiceExt;
        let app = Router::new().route("/", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_body_reaches_the_handler() {
        let (status, body) = send(r#"{"name":"Ana","term":2}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Ana:2");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let (status, body) = send("{name:").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains(r#""success":false"#));
    }

    #[tokio::test]
    async fn rule_violations_are_unprocessable() {
        let (status, body) = send(r#"{"name":"","term":9}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("name: must be 1-20 characters"));
        assert!(body.contains("term: range"));
    }
}
