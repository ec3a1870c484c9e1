//! End-to-end report scenarios through the HTTP router, against an
//! in-memory SQLite database.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{json, Value};
use tower::ServiceExt;

use escola::infrastructure::database::entities::{course, evaluation, payment, subject};
use escola::shared::types::PaginationSettings;
use escola::{create_api_router, init_database, run_migrations, AppState, DatabaseConfig};

async fn database() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&db).await.unwrap();
    db
}

fn router(db: &DatabaseConnection) -> Router {
    create_api_router(
        AppState::new(db.clone(), PaginationSettings::default()),
        None,
    )
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            request = request.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get(app: &Router, uri: &str) -> Value {
    let (status, body) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK, "GET {uri}: {body}");
    body
}

async fn register(app: &Router, name: &str, number: &str, status: &str, class_id: Option<i64>) -> i64 {
    let (code, body) = send(
        app,
        Method::POST,
        "/api/v1/students",
        Some(json!({
            "fullName": name,
            "processNumber": number,
            "status": status,
            "classId": class_id,
            "enrolledAt": "2024-09-02T08:00:00Z"
        })),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

fn meta(current: u64, pages: u64, total: u64, per_page: u64, next: bool, prev: bool) -> Value {
    json!({
        "currentPage": current,
        "totalPages": pages,
        "totalItems": total,
        "itemsPerPage": per_page,
        "hasNextPage": next,
        "hasPreviousPage": prev
    })
}

#[tokio::test]
async fn active_students_paginate_over_three_pages() {
    let db = database().await;
    let app = router(&db);
    for i in 0..25 {
        register(&app, &format!("Aluno {i:02}"), &format!("A-{i:02}"), "Ativo", None).await;
    }
    for i in 0..5 {
        register(&app, &format!("Desistente {i}"), &format!("D-{i}"), "Desistente", None).await;
    }

    let first = get(&app, "/api/v1/reports/students?status=Ativo&page=1&limit=10").await;
    assert_eq!(first["data"]["items"].as_array().unwrap().len(), 10);
    assert_eq!(first["data"]["pagination"], meta(1, 3, 25, 10, true, false));
    assert_eq!(first["data"]["items"][0]["fullName"], "Aluno 00");
    assert_eq!(first["data"]["items"][0]["className"], "N/A");

    let last = get(&app, "/api/v1/reports/students?status=Ativo&page=3&limit=10").await;
    assert_eq!(last["data"]["items"].as_array().unwrap().len(), 5);
    assert_eq!(last["data"]["pagination"], meta(3, 3, 25, 10, false, true));

    let beyond = get(&app, "/api/v1/reports/students?status=Ativo&page=4&limit=10").await;
    assert_eq!(beyond["data"]["items"], json!([]));
    assert_eq!(beyond["data"]["pagination"], meta(4, 3, 25, 10, false, true));

    let again = get(&app, "/api/v1/reports/students?status=Ativo&page=1&limit=10").await;
    assert_eq!(again, first);

    let unknown_status = get(&app, "/api/v1/reports/students?status=Expulso").await;
    assert_eq!(unknown_status["data"]["pagination"]["totalItems"], 30);
}

#[tokio::test]
async fn empty_database_yields_one_empty_page() {
    let db = database().await;
    let app = router(&db);

    let body = get(&app, "/api/v1/reports/students").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["pagination"], meta(1, 1, 0, 10, false, false));
}

#[tokio::test]
async fn invalid_page_parameters_are_rejected() {
    let db = database().await;
    let app = router(&db);

    for uri in [
        "/api/v1/reports/students?page=0",
        "/api/v1/reports/students?page=-1",
        "/api/v1/reports/students?limit=0",
        "/api/v1/reports/students?limit=500",
        "/api/v1/reports/students?page=abc",
        "/api/v1/reports/students?page=1000000000000000000&limit=10",
        "/api/v1/students?page=9223372036854775807&limit=100",
        "/api/v1/reports/students?page=99999999999999999999",
        "/api/v1/reports/financial?from=yesterday",
        "/api/v1/reports/financial?from=2024-12-01&to=2024-11-01",
        "/api/v1/reports/academic/summary?minGrade=15&maxGrade=10",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert!(body.get("data").is_none(), "{uri}");
    }
}

#[tokio::test]
async fn academic_report_and_summary_share_filters() {
    let db = database().await;
    let app = router(&db);

    let (_, class) = send(
        &app,
        Method::POST,
        "/api/v1/classes",
        Some(json!({ "name": "10A", "academicYear": "2024/2025" })),
    )
    .await;
    let class_id = class["data"]["id"].as_i64().unwrap();
    let ana = register(&app, "Ana Silva", "P-001", "Ativo", Some(class_id)).await;
    let rui = register(&app, "Rui Costa", "P-002", "Ativo", Some(class_id)).await;

    let maths = subject::ActiveModel {
        name: Set("Matemática".into()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let grades = [(ana, Some(14.0), 1), (ana, Some(9.0), 2), (rui, Some(12.5), 1), (rui, None, 2)];
    for (i, (student_id, grade, term)) in grades.into_iter().enumerate() {
        evaluation::ActiveModel {
            student_id: Set(student_id),
            subject_id: Set(Some(maths.id)),
            class_id: Set(Some(class_id)),
            term: Set(term),
            kind: Set(1),
            grade: Set(grade),
            evaluated_at: Set(Utc.with_ymd_and_hms(2025, 1, 10 + i as u32, 9, 0, 0).unwrap()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
    }

    let report = get(&app, "/api/v1/reports/academic?academicYear=2024/2025").await;
    let items = report["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["subject"], "Matemática");
    assert_eq!(items[0]["kind"], "Prova");
    assert_eq!(items[3]["grade"], 0.0);
    assert_eq!(items[3]["graded"], false);
    assert!(items[0].get("studentId").is_none());

    let summary = get(&app, "/api/v1/reports/academic/summary?academicYear=2024/2025").await;
    assert_eq!(
        summary["data"],
        json!({
            "totalEvaluations": 4,
            "gradedEvaluations": 3,
            "averageGrade": 11.83,
            "approved": 2,
            "failed": 1,
            "approvalRate": 66.67
        })
    );

    let passing = get(&app, "/api/v1/reports/academic?minGrade=10&search=ana").await;
    assert_eq!(passing["data"]["pagination"]["totalItems"], 1);
    assert_eq!(passing["data"]["items"][0]["grade"], 14.0);

    let term_two = get(&app, "/api/v1/reports/academic/summary?term=2").await;
    assert_eq!(term_two["data"]["totalEvaluations"], 2);
    assert_eq!(term_two["data"]["gradedEvaluations"], 1);

    let options = get(&app, "/api/v1/reports/academic/filter-options").await;
    assert_eq!(options["data"]["academicYears"], json!(["2024/2025"]));
    assert_eq!(options["data"]["subjects"][0]["name"], "Matemática");
    assert_eq!(options["data"]["terms"], json!([1, 2]));
}

#[tokio::test]
async fn financial_report_handles_legacy_rows_and_large_amounts() {
    let db = database().await;
    let app = router(&db);
    let ana = register(&app, "Ana Silva", "P-001", "Ativo", None).await;

    let due = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
    let rows = [
        ("REF-1", Some(ana), 25_000, 1, Some("Multicaixa"), due(9, 10)),
        ("REF-2", Some(ana), 25_000, 2, Some("Transferência"), due(10, 10)),
        ("REF-3", None, 9_007_199_254_740_993, 2, None, due(11, 10)),
    ];
    for (reference, student_id, amount, status, method, due_date) in rows {
        payment::ActiveModel {
            student_id: Set(student_id),
            reference: Set(reference.into()),
            description: Set(None),
            amount: Set(amount),
            status: Set(status),
            method: Set(method.map(str::to_string)),
            due_date: Set(due_date),
            paid_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
    }

    let report = get(&app, "/api/v1/reports/financial").await;
    let items = report["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["student"]["fullName"], "Ana Silva");
    assert_eq!(items[0]["status"], "Pago");
    assert!(items[2]["student"].is_null());
    assert_eq!(items[2]["method"], "N/A");
    assert_eq!(items[2]["amount"], "9007199254740993");

    let pending = get(&app, "/api/v1/reports/financial?status=pendente&to=2024-10-31").await;
    assert_eq!(pending["data"]["pagination"]["totalItems"], 1);
    assert_eq!(pending["data"]["items"][0]["reference"], "REF-2");

    let by_payer = get(&app, "/api/v1/reports/financial?search=silva&minAmount=1000").await;
    assert_eq!(by_payer["data"]["pagination"]["totalItems"], 2);

    let summary = get(&app, "/api/v1/reports/financial/summary?maxAmount=100000").await;
    assert_eq!(summary["data"]["totalPayments"], 2);
    assert_eq!(summary["data"]["totalAmount"], 50_000);
    assert_eq!(summary["data"]["byStatus"][0]["status"], "Pago");
    assert_eq!(summary["data"]["byStatus"][1]["status"], "Pendente");

    let options = get(&app, "/api/v1/reports/financial/filter-options").await;
    assert_eq!(options["data"]["methods"], json!(["Multicaixa", "Transferência"]));
}

#[tokio::test]
async fn financial_summary_total_past_i64_is_stringified() {
    let db = database().await;
    let app = router(&db);
    for (reference, status) in [("BIG-1", 1), ("BIG-2", 2)] {
        payment::ActiveModel {
            student_id: Set(None),
            reference: Set(reference.into()),
            description: Set(None),
            amount: Set(5_000_000_000_000_000_000),
            status: Set(status),
            method: Set(None),
            due_date: Set(NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()),
            paid_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
    }

    let summary = get(&app, "/api/v1/reports/financial/summary").await;
    assert_eq!(summary["data"]["totalPayments"], 2);
    assert_eq!(summary["data"]["totalAmount"], "10000000000000000000");
    assert_eq!(summary["data"]["byStatus"][0]["amount"], "5000000000000000000");
}

#[tokio::test]
async fn student_report_joins_class_and_course() {
    let db = database().await;
    let app = router(&db);

    let sciences = course::ActiveModel {
        name: Set("Ciências".into()),
        code: Set(Some("CFB".into())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let (status, class) = send(
        &app,
        Method::POST,
        "/api/v1/classes",
        Some(json!({ "name": "11B", "academicYear": "2023/2024", "courseId": sciences.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let class_id = class["data"]["id"].as_i64().unwrap();

    register(&app, "Bruno Lopes", "P-010", "Ativo", Some(class_id)).await;
    register(&app, "Carla Neto", "P-011", "Transferido", None).await;

    let by_course = get(
        &app,
        &format!("/api/v1/reports/students?courseId={}", sciences.id),
    )
    .await;
    assert_eq!(by_course["data"]["pagination"]["totalItems"], 1);
    let row = &by_course["data"]["items"][0];
    assert_eq!(row["className"], "11B");
    assert_eq!(row["academicYear"], "2023/2024");
    assert_eq!(row["course"], "Ciências");

    let window = get(
        &app,
        "/api/v1/reports/students?enrolledFrom=2024-09-02&enrolledTo=2024-09-02",
    )
    .await;
    assert_eq!(window["data"]["pagination"]["totalItems"], 2);

    let options = get(&app, "/api/v1/reports/students/filter-options").await;
    assert_eq!(options["data"]["courses"][0]["name"], "Ciências");
    assert_eq!(options["data"]["classes"][0]["academicYear"], "2023/2024");
    assert_eq!(options["data"]["statuses"].as_array().unwrap().len(), 4);
}
