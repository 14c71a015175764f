mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, student_payload};

/// 远期日期，避开过去日期校验
const EXAM_DATE: &str = "2099-06-01";

/// 发送 JSON 请求，返回状态码与响应体
macro_rules! post_json {
    ($app:expr, $uri:expr, $payload:expr $(,)?) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($payload)
            .to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

/// 一个班级、两名学生、一场考试和三门科目
struct Fixture {
    class_id: i64,
    students: [i64; 2],
    exam_id: i64,
    subjects: [i64; 3],
}

macro_rules! seed {
    ($app:expr) => {{
        let app = $app;
        let (status, first) =
            post_json!(app, "/api/students", student_payload("Nadia", "Grade 9", "B", 1));
        assert_eq!(status, StatusCode::CREATED);
        let (_, second) =
            post_json!(app, "/api/students", student_payload("Imran", "Grade 9", "B", 2));
        let class_id = first["data"]["ClassID"].as_i64().unwrap();
        assert_eq!(second["data"]["ClassID"], class_id);

        let (status, exam) = post_json!(
            app,
            "/api/exams",
            json!({
                "ExamName": "Midterm",
                "ExamType": "Quarterly",
                "ClassID": class_id,
                "ExamDate": EXAM_DATE,
            }),
        );
        assert_eq!(status, StatusCode::CREATED);

        let mut subjects = [0; 3];
        for (slot, name) in subjects.iter_mut().zip(["Mathematics", "Physics", "History"]) {
            let (status, subject) = post_json!(
                app,
                "/api/subjects/add",
                json!({ "SubjectName": name, "ClassID": class_id }),
            );
            assert_eq!(status, StatusCode::CREATED);
            *slot = subject["data"]["SubjectID"].as_i64().unwrap();
        }

        Fixture {
            class_id,
            students: [
                first["data"]["StudentID"].as_i64().unwrap(),
                second["data"]["StudentID"].as_i64().unwrap(),
            ],
            exam_id: exam["data"]["ExamID"].as_i64().unwrap(),
            subjects,
        }
    }};
}

fn result_row(fx: &Fixture, student: usize, subject: usize, marks: f64) -> Value {
    json!({
        "StudentID": fx.students[student],
        "ExamID": fx.exam_id,
        "SubjectID": fx.subjects[subject],
        "ClassID": fx.class_id,
        "MarksObtained": marks,
    })
}

#[actix_web::test]
async fn test_student_summary_totals_and_grades() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let fx = seed!(&app);

    for (subject, marks) in [(0, 95.0), (1, 85.0), (2, 35.0)] {
        let (status, _) = post_json!(&app, "/api/results", result_row(&fx, 0, subject, marks));
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/results/summary/{}/{}", fx.students[0], fx.exam_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let summary = &body["data"];

    assert_eq!(summary["TotalMarks"].as_f64(), Some(215.0));
    assert_eq!(summary["MaxMarks"].as_f64(), Some(300.0));
    assert_eq!(summary["Percentage"].as_f64(), Some(71.67));
    assert_eq!(summary["SubjectCount"], 3);
    assert_eq!(summary["OverallGrade"], "B");

    let subjects = summary["Subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 3);
    let history = subjects
        .iter()
        .find(|s| s["SubjectName"] == "History")
        .unwrap();
    assert_eq!(history["Grade"], "F");
    assert_eq!(history["Status"], "FAIL");
    let maths = subjects
        .iter()
        .find(|s| s["SubjectName"] == "Mathematics")
        .unwrap();
    assert_eq!(maths["Grade"], "A+");
    assert_eq!(maths["Status"], "PASS");

    // 没有成绩的学生
    let req = test::TestRequest::get()
        .uri(&format!("/api/results/summary/{}/{}", fx.students[1], fx.exam_id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_class_summary_ranks_by_total() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let fx = seed!(&app);

    let rows = [
        result_row(&fx, 0, 0, 50.0),
        result_row(&fx, 0, 1, 60.0),
        result_row(&fx, 1, 0, 90.0),
        result_row(&fx, 1, 1, 80.0),
    ];
    let (status, body) = post_json!(&app, "/api/results/batch", json!({ "results": rows }));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["inserted"], 4);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/results/summary/class/{}/exam/{}",
            fx.class_id, fx.exam_id
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let ranking = body["data"].as_array().unwrap();

    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0]["StudentID"], fx.students[1]);
    assert_eq!(ranking[0]["TotalMarks"].as_f64(), Some(170.0));
    assert_eq!(ranking[0]["Percentage"].as_f64(), Some(85.0));
    assert_eq!(ranking[1]["StudentID"], fx.students[0]);
    assert_eq!(ranking[1]["SubjectCount"], 2);
    assert_eq!(ranking[1]["Percentage"].as_f64(), Some(55.0));
}

#[actix_web::test]
async fn test_batch_reports_row_errors() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let fx = seed!(&app);

    let mut out_of_range = result_row(&fx, 0, 1, 80.0);
    out_of_range["MarksObtained"] = json!(120.0);
    let rows = json!({
        "results": [
            result_row(&fx, 0, 0, 72.0),
            out_of_range,
            result_row(&fx, 0, 0, 72.0),
        ]
    });
    let (status, body) = post_json!(&app, "/api/results/batch", rows);
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["inserted"], 1);
    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["index"], 1);
    assert_eq!(errors[1]["index"], 2);

    // 全部失败时返回 400，同时带回逐行错误
    let rows = json!({ "results": [result_row(&fx, 0, 0, 72.0)] });
    let (status, body) = post_json!(&app, "/api/results/batch", rows);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["inserted"], 0);
    assert_eq!(body["data"]["errors"].as_array().unwrap().len(), 1);

    let (status, _) = post_json!(&app, "/api/results/batch", json!({ "results": [] }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_exam_in_the_past_rejected() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/classes/add")
        .set_json(json!({ "ClassName": "Grade 4", "Section": "A" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let class_id = body["data"]["class"]["ClassID"].as_i64().unwrap();

    let (status, _) = post_json!(
        &app,
        "/api/exams",
        json!({
            "ExamName": "Old exam",
            "ExamType": "Monthly",
            "ClassID": class_id,
            "ExamDate": "2001-01-15",
        }),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let today = chrono::Local::now().date_naive().to_string();
    let (status, body) = post_json!(
        &app,
        "/api/exams",
        json!({
            "ExamName": "Today",
            "ExamType": "Monthly",
            "ClassID": class_id,
            "ExamDate": today,
        }),
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["ExamType"], "Monthly");
}
