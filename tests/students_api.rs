mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, student_payload};

#[actix_web::test]
async fn test_created_student_is_retrievable() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/students")
        .set_json(student_payload("Ayesha", "Grade 5", "A", 7))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    let student_id = body["data"]["StudentID"].as_i64().expect("generated id");
    assert!(student_id > 0);
    assert_eq!(body["data"]["ClassName"], "Grade 5");

    let req = test::TestRequest::get()
        .uri(&format!("/api/students/{student_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["StudentID"], student_id);
    assert_eq!(body["data"]["FirstName"], "Ayesha");
    assert_eq!(body["data"]["RollNumber"], 7);
}

#[actix_web::test]
async fn test_missing_student_fields_rejected() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/students")
        .set_json(json!({ "FirstName": "Ayesha" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("LastName"));
}

#[actix_web::test]
async fn test_duplicate_roll_in_class_conflicts() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    for (name, expected) in [("Ayesha", StatusCode::CREATED), ("Nadia", StatusCode::CONFLICT)] {
        let req = test::TestRequest::post()
            .uri("/api/students")
            .set_json(student_payload(name, "Grade 5", "A", 3))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "{name}");
    }
}

#[actix_web::test]
async fn test_deleting_unknown_ids_returns_404() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    for uri in [
        "/api/students/deleteStudent/9999",
        "/api/teachers/deleteTeacher/9999",
        "/api/classes/delete/9999",
        "/api/subjects/delete/9999",
        "/api/exams/9999",
        "/api/results/9999",
        "/api/attendance/9999",
        "/api/notices/delete/9999",
        "/api/messages/delete/9999",
        "/api/events/9999",
    ] {
        let req = test::TestRequest::delete().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn test_invalid_path_id_is_bad_request() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    for uri in ["/api/students/abc", "/api/students/0", "/api/exams/-1"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn test_class_lookup_reuses_existing_row() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let payload = json!({ "ClassName": "Grade 6", "Section": "B" });

    let req = test::TestRequest::post()
        .uri("/api/classes/add")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["created"], true);
    let class_id = body["data"]["class"]["ClassID"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/classes/add")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["created"], false);
    assert_eq!(body["data"]["class"]["ClassID"], class_id);

    // 新增学生时按名称与分部解析到同一个班级
    let req = test::TestRequest::post()
        .uri("/api/students")
        .set_json(student_payload("Rafi", "Grade 6", "B", 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["ClassID"], class_id);

    let req = test::TestRequest::get().uri("/api/classes").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["StudentCount"], 1);
}

#[actix_web::test]
async fn test_student_search_requires_a_filter() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get().uri("/api/students/search").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/students")
        .set_json(student_payload("Ayesha", "Grade 5", "A", 7))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/students/search?FirstName=Aye&Class=Grade%205")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_health_reports_database() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "connected");
}
