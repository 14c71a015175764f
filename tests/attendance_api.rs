mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, student_payload};

#[actix_web::test]
async fn test_student_summary_percentage() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/students")
        .set_json(student_payload("Ayesha", "Grade 5", "A", 1))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let student_id = body["data"]["StudentID"].as_i64().unwrap();
    let class_id = body["data"]["ClassID"].as_i64().unwrap();

    for (day, status) in [
        ("2024-03-01", "Present"),
        ("2024-03-02", "Present"),
        ("2024-03-03", "Absent"),
        ("2024-03-04", "Present"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({
                "StudentID": student_id,
                "ClassID": class_id,
                "ClassDate": day,
                "Status": status,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "{day}");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/attendance/summary/student/{student_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["TotalPresent"], 3);
    assert_eq!(body["data"]["TotalAbsent"], 1);
    assert_eq!(body["data"]["totalDays"], 4);
    assert_eq!(body["data"]["AttendancePercentage"].as_f64(), Some(75.0));
}

#[actix_web::test]
async fn test_summary_without_records_is_404() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/attendance/summary/student/42")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_same_day_attendance_conflicts_and_mark_updates() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/students")
        .set_json(student_payload("Nadia", "Grade 4", "C", 2))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let student_id = body["data"]["StudentID"].as_i64().unwrap();
    let class_id = body["data"]["ClassID"].as_i64().unwrap();

    let record = json!({
        "StudentID": student_id,
        "ClassID": class_id,
        "ClassDate": "2024-05-10",
        "Status": "Absent",
    });
    let req = test::TestRequest::post()
        .uri("/api/attendance")
        .set_json(&record)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/api/attendance")
        .set_json(&record)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    // mark 对已有记录执行更新
    let req = test::TestRequest::post()
        .uri("/api/attendance/mark")
        .set_json(json!({
            "StudentID": student_id,
            "ClassDate": "2024-05-10",
            "Status": "Present",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["action"], "updated");
    assert_eq!(body["data"]["attendance"]["Status"], "Present");
}

#[actix_web::test]
async fn test_sync_rejects_month_out_of_range() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/attendance/validate-sync")
        .set_json(json!({
            "className": "Grade 5",
            "section": "A",
            "month": 12,
            "year": 2024,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_sync_on_empty_class_is_404() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/classes/add")
        .set_json(json!({ "ClassName": "Grade 2", "Section": "C" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    for uri in ["/api/attendance/validate-sync", "/api/attendance/force-sync"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({
                "className": "Grade 2",
                "section": "C",
                "month": 4,
                "year": 2024,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}
