//! API router with Swagger documentation
//!
//! One [`AppState`] is built at startup; every module extracts its own
//! slice of it through `FromRef`.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::FromRef, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PageMetaDto, PaginatedData};
use super::modules::classes::{self, ClassState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::reports::{self, ReportState};
use super::modules::request_id::request_id_middleware;
use super::modules::status_types::{self, CodeLabelDto, StatusTypeDto};
use super::modules::students::{self, StudentState};
use crate::application::{ClassService, ReportService, StudentService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::SeaOrmRepositoryProvider;
use crate::shared::types::PaginationSettings;

/// Everything the handlers share for the lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub pagination: PaginationSettings,
    pub started_at: Arc<Instant>,
    pub students: Arc<StudentService>,
    pub classes: Arc<ClassService>,
    pub reports: Arc<ReportService>,
}

impl AppState {
    /// Wires the SeaORM repositories and the services over one pool.
    pub fn new(db: DatabaseConnection, pagination: PaginationSettings) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        Self {
            db,
            pagination,
            started_at: Arc::new(Instant::now()),
            students: Arc::new(StudentService::new(repos.clone())),
            classes: Arc::new(ClassService::new(repos.clone())),
            reports: Arc::new(ReportService::new(repos)),
        }
    }
}

impl FromRef<AppState> for StudentState {
    fn from_ref(s: &AppState) -> Self {
        StudentState {
            service: Arc::clone(&s.students),
            pagination: s.pagination,
        }
    }
}

impl FromRef<AppState> for ClassState {
    fn from_ref(s: &AppState) -> Self {
        ClassState {
            service: Arc::clone(&s.classes),
            pagination: s.pagination,
        }
    }
}

impl FromRef<AppState> for ReportState {
    fn from_ref(s: &AppState) -> Self {
        ReportState {
            service: Arc::clone(&s.reports),
            pagination: s.pagination,
        }
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Students
        students::list_students,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
        // Classes
        classes::list_classes,
        classes::get_class,
        classes::create_class,
        classes::update_class,
        classes::delete_class,
        // Status types
        status_types::list_status_types,
        status_types::get_status_type,
        // Reports
        reports::student_report,
        reports::student_filter_options,
        reports::academic_report,
        reports::academic_summary,
        reports::academic_filter_options,
        reports::financial_report,
        reports::financial_summary,
        reports::financial_filter_options,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PageMetaDto,
            PaginatedData<students::StudentDto>,
            health::HealthResponse,
            health::ComponentHealth,
            students::StudentDto,
            students::CreateStudentRequest,
            students::UpdateStudentRequest,
            classes::ClassDto,
            classes::CreateClassRequest,
            classes::UpdateClassRequest,
            CodeLabelDto,
            StatusTypeDto,
            reports::StudentReportRowDto,
            reports::StudentFilterOptionsDto,
            reports::EvaluationRowDto,
            reports::AcademicSummaryDto,
            reports::AcademicFilterOptionsDto,
            reports::PaymentRowDto,
            reports::StatusTotalDto,
            reports::FinancialSummaryDto,
            reports::FinancialFilterOptionsDto,
            reports::OptionDto,
            reports::ClassOptionDto,
            reports::StudentRefDto,
        )
    ),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Students", description = "Student registration and lookup"),
        (name = "Classes", description = "Classes per academic year"),
        (name = "Status Types", description = "Code tables behind status, gender and evaluation kind"),
        (name = "Reports", description = "Paged student, academic and financial reports"),
    ),
    info(
        title = "Escola Service API",
        version = "1.0.0",
        description = "REST API for school management: students, classes and reports",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the full application router.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let student_routes = Router::new()
        .route(
            "/",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        );

    let class_routes = Router::new()
        .route("/", get(classes::list_classes).post(classes::create_class))
        .route(
            "/{id}",
            get(classes::get_class)
                .put(classes::update_class)
                .delete(classes::delete_class),
        );

    let status_type_routes = Router::new()
        .route("/", get(status_types::list_status_types))
        .route("/{kind}", get(status_types::get_status_type));

    let report_routes = Router::new()
        .route("/students", get(reports::student_report))
        .route(
            "/students/filter-options",
            get(reports::student_filter_options),
        )
        .route("/academic", get(reports::academic_report))
        .route("/academic/summary", get(reports::academic_summary))
        .route(
            "/academic/filter-options",
            get(reports::academic_filter_options),
        )
        .route("/financial", get(reports::financial_report))
        .route("/financial/summary", get(reports::financial_summary))
        .route(
            "/financial/filter-options",
            get(reports::financial_filter_options),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/students", student_routes)
        .nest("/api/v1/classes", class_routes)
        .nest("/api/v1/status-types", status_type_routes)
        .nest("/api/v1/reports", report_routes)
        .with_state(state)
        .merge(swagger_routes);

    if let Some(handle) = metrics {
        app = app.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    app.layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;
    use crate::interfaces::http::modules::request_id::REQUEST_ID_HEADER;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let state = AppState::new(test_database().await, PaginationSettings::default());
        create_api_router(state, None)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn empty_list_has_single_empty_page() {
        let app = app().await;
        let (status, body) = call(&app, Method::GET, "/api/v1/students", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["items"], json!([]));
        assert_eq!(
            body["data"]["pagination"],
            json!({
                "currentPage": 1,
                "totalPages": 1,
                "totalItems": 0,
                "itemsPerPage": 10,
                "hasNextPage": false,
                "hasPreviousPage": false
            })
        );
    }

    #[tokio::test]
    async fn create_then_fetch_student() {
        let app = app().await;
        let (status, created) = call(
            &app,
            Method::POST,
            "/api/v1/students",
            Some(json!({ "fullName": "Ana Silva", "processNumber": "P-001", "gender": "feminino" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["status"], "Ativo");
        assert_eq!(created["data"]["gender"], "Feminino");

        let id = created["data"]["id"].as_i64().unwrap();
        let (status, fetched) =
            call(&app, Method::GET, &format!("/api/v1/students/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"]["processNumber"], "P-001");
    }

    #[tokio::test]
    async fn duplicate_process_number_is_409() {
        let app = app().await;
        let body = json!({ "fullName": "Ana", "processNumber": "P-001" });
        call(&app, Method::POST, "/api/v1/students", Some(body.clone())).await;
        let (status, response) = call(&app, Method::POST, "/api/v1/students", Some(body)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(response["success"], false);
    }

    #[tokio::test]
    async fn error_statuses_follow_the_error_kind() {
        let app = app().await;

        let (status, body) = call(&app, Method::GET, "/api/v1/students?limit=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = call(&app, Method::GET, "/api/v1/students?limit=101", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&app, Method::GET, "/api/v1/students?classId=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("classId"));

        let (status, _) = call(&app, Method::GET, "/api/v1/students/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::DELETE, "/api/v1/classes/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/students",
            Some(json!({ "fullName": "", "processNumber": "P-9" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/students",
            Some(json!({ "fullName": "Rui", "processNumber": "P-9", "status": "Expulso" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_types_are_served_from_the_code_tables() {
        let app = app().await;
        let (status, body) = call(&app, Method::GET, "/api/v1/status-types", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 4);

        let (status, body) = call(&app, Method::GET, "/api/v1/status-types/payment", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["entries"][1], json!({ "code": 2, "label": "Pendente" }));

        let (status, _) = call(&app, Method::GET, "/api/v1/status-types/colour", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn class_crud_round() {
        let app = app().await;
        let (status, created) = call(
            &app,
            Method::POST,
            "/api/v1/classes",
            Some(json!({ "name": "10A", "academicYear": "2024/2025", "shift": "manhã" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["shift"], "Manhã");
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, updated) = call(
            &app,
            Method::PUT,
            &format!("/api/v1/classes/{id}"),
            Some(json!({ "room": "Sala 3" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["room"], "Sala 3");

        let (status, list) =
            call(&app, Method::GET, "/api/v1/classes?academicYear=2024/2025", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["data"]["pagination"]["totalItems"], 1);

        let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/classes/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn report_endpoints_answer_on_an_empty_database() {
        let app = app().await;
        for uri in [
            "/api/v1/reports/students",
            "/api/v1/reports/academic",
            "/api/v1/reports/financial",
        ] {
            let (status, body) = call(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["data"]["pagination"]["totalPages"], 1, "{uri}");
        }

        let (status, body) = call(&app, Method::GET, "/api/v1/reports/academic/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["totalEvaluations"], 0);

        let (status, body) =
            call(&app, Method::GET, "/api/v1/reports/financial/filter-options", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["statuses"].as_array().unwrap().len(), 4);

        let (status, _) = call(&app, Method::GET, "/api/v1/reports/academic?term=5", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let app = app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[test]
    fn openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/students",
            "/api/v1/classes/{id}",
            "/api/v1/status-types/{kind}",
            "/api/v1/reports/financial/summary",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
